//! Document persistence for interviews, feedback and users

mod backend;
mod codec;
mod firestore;
mod interview;
mod memory;
mod records;

pub use backend::DocumentStore;
pub use codec::{decode_fields, encode_fields};
pub use firestore::FirestoreStore;
pub use interview::InterviewStore;
pub use memory::MemoryStore;
pub use records::{
    CategoryScore, FeedbackRecord, InterviewRecord, UserRecord, FEEDBACK, INTERVIEWS, USERS,
};
