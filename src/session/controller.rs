use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};

use super::config::{SessionConfig, SessionMode};
use super::dispatch::{DispatchJob, Dispatcher, Route};
use super::state::{CallStatus, Effect, SessionState, TranscriptEntry};
use super::stats::SessionSnapshot;
use crate::error::{Error, Result};
use crate::voice::{VoiceClient, VoiceEvent};

enum Command {
    Call(oneshot::Sender<Result<()>>),
    Disconnect(oneshot::Sender<Result<()>>),
    Shutdown,
}

/// Drives one voice session: call control, transcript, post-call dispatch
///
/// Runs as a single task. User commands, voice events and dispatch results
/// are handled one at a time, so state changes follow delivery order.
pub struct SessionController {
    config: SessionConfig,
    state: SessionState,
    voice: Arc<dyn VoiceClient>,
    dispatcher: Dispatcher,
    started_at: DateTime<Utc>,
    /// Bumped on every call; dispatch results from an earlier call are dropped
    call_id: u64,
    is_dispatching: bool,
    dispatch_complete: bool,
    route: Option<Route>,
    last_error: Option<String>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
    dispatch_tx: mpsc::UnboundedSender<(u64, Option<Route>)>,
}

impl SessionController {
    /// Start the controller task and return a handle to it
    pub fn spawn(
        config: SessionConfig,
        voice: Arc<dyn VoiceClient>,
        events: mpsc::Receiver<VoiceEvent>,
        dispatcher: Dispatcher,
    ) -> SessionHandle {
        let session_id = config.session_id.clone();
        let state = SessionState::new(config.mode.is_generate());
        let (command_tx, command_rx) = mpsc::channel(16);
        let (dispatch_tx, dispatch_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(empty_snapshot(&session_id));

        let controller = Self {
            config,
            state,
            voice,
            dispatcher,
            started_at: Utc::now(),
            call_id: 0,
            is_dispatching: false,
            dispatch_complete: false,
            route: None,
            last_error: None,
            snapshot_tx,
            dispatch_tx,
        };
        controller.publish();

        info!(
            "Session {} created in {} mode (voice client: {})",
            session_id,
            controller.config.mode.label(),
            controller.voice.name()
        );

        tokio::spawn(controller.run(command_rx, events, dispatch_rx));

        SessionHandle {
            session_id,
            commands: command_tx,
            snapshot: snapshot_rx,
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut events: mpsc::Receiver<VoiceEvent>,
        mut dispatch_rx: mpsc::UnboundedReceiver<(u64, Option<Route>)>,
    ) {
        let mut events_open = true;

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Call(reply)) => {
                        let result = self.handle_call().await;
                        self.publish();
                        let _ = reply.send(result);
                    }
                    Some(Command::Disconnect(reply)) => {
                        let result = self.handle_disconnect();
                        self.publish();
                        let _ = reply.send(result);
                    }
                    Some(Command::Shutdown) | None => break,
                },
                event = events.recv(), if events_open => match event {
                    Some(event) => self.handle_event(event),
                    None => {
                        warn!("Voice event stream closed for {}", self.config.session_id);
                        events_open = false;
                    }
                },
                Some((call_id, route)) = dispatch_rx.recv() => self.finish_dispatch(call_id, route),
            }

            self.publish();
        }

        info!("Session {} controller stopped", self.config.session_id);
    }

    async fn handle_call(&mut self) -> Result<()> {
        self.state.begin_call()?;
        self.call_id += 1;
        self.route = None;
        self.is_dispatching = false;
        self.dispatch_complete = false;
        self.last_error = None;
        self.publish();

        info!("Starting {} call for {}", self.config.mode.label(), self.config.session_id);

        // A rejected start leaves the session in Connecting; the caller is not told
        if let Err(e) = self.voice.start(self.config.start_config()).await {
            error!("Failed to start call: {}", e);
            self.state.reject_start();
            self.last_error = Some(e.to_string());
        }

        Ok(())
    }

    fn handle_disconnect(&mut self) -> Result<()> {
        let effect = self.state.disconnect()?;
        info!("User ended call for {}", self.config.session_id);

        let voice = Arc::clone(&self.voice);
        tokio::spawn(async move {
            if let Err(e) = voice.stop().await {
                warn!("Failed to stop call: {}", e);
            }
        });

        if effect == Some(Effect::Dispatch) {
            self.start_dispatch();
        }

        Ok(())
    }

    fn handle_event(&mut self, event: VoiceEvent) {
        if let VoiceEvent::Error { error } = &event {
            warn!("Voice client error: {}", error);
        }

        let before = self.state.status();
        let effect = self.state.apply(&event);
        let after = self.state.status();
        if before != after {
            info!("Session {}: {:?} -> {:?}", self.config.session_id, before, after);
        }

        if effect == Some(Effect::Dispatch) {
            self.start_dispatch();
        }
    }

    fn start_dispatch(&mut self) {
        let job = match &self.config.mode {
            SessionMode::Generate { user_id, .. } => DispatchJob::Generate {
                user_id: user_id.clone(),
                collected: self.state.collected().clone(),
            },
            SessionMode::Interview {
                user_id,
                interview_id,
                feedback_id,
                ..
            } => DispatchJob::feedback(
                interview_id,
                user_id,
                feedback_id.as_deref(),
                self.state.transcript(),
            ),
        };

        self.is_dispatching = true;

        let dispatcher = self.dispatcher.clone();
        let voice = Arc::clone(&self.voice);
        let dispatch_tx = self.dispatch_tx.clone();
        let call_id = self.call_id;
        tokio::spawn(async move {
            let route = dispatcher.run(job, voice.as_ref()).await;
            let _ = dispatch_tx.send((call_id, route));
        });
    }

    fn finish_dispatch(&mut self, call_id: u64, route: Option<Route>) {
        if call_id != self.call_id {
            debug!(
                "Session {}: dropping dispatch result from call {} (current call {})",
                self.config.session_id, call_id, self.call_id
            );
            return;
        }

        self.is_dispatching = false;
        self.dispatch_complete = true;

        match &route {
            Some(route) => info!("Session {} navigating to {}", self.config.session_id, route.path()),
            None => warn!("Session {} staying on current screen", self.config.session_id),
        }
        self.route = route;
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.config.session_id.clone(),
            mode: self.config.mode.label(),
            status: self.state.status(),
            is_speaking: self.state.is_speaking(),
            is_dispatching: self.is_dispatching,
            dispatch_complete: self.dispatch_complete,
            route: self.route.clone(),
            last_message: self.state.last_message().map(str::to_string),
            transcript_entries: self.state.transcript().len(),
            collected: self.state.collected().clone(),
            last_error: self.last_error.clone(),
            started_at: self.started_at,
            transcript: self.state.transcript().to_vec(),
        }
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }
}

fn empty_snapshot(session_id: &str) -> SessionSnapshot {
    SessionSnapshot {
        session_id: session_id.to_string(),
        mode: "",
        status: CallStatus::Inactive,
        is_speaking: false,
        is_dispatching: false,
        dispatch_complete: false,
        route: None,
        last_message: None,
        transcript_entries: 0,
        collected: Default::default(),
        last_error: None,
        started_at: Utc::now(),
        transcript: Vec::new(),
    }
}

/// Cloneable handle to a running [`SessionController`]
#[derive(Clone)]
pub struct SessionHandle {
    session_id: String,
    commands: mpsc::Sender<Command>,
    snapshot: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Place the call (Inactive/Finished → Connecting, or retry a rejected start)
    pub async fn call(&self) -> Result<()> {
        self.request(Command::Call).await
    }

    /// Hang up (Active → Finished) and run the post-call procedure
    pub async fn disconnect(&self) -> Result<()> {
        self.request(Command::Disconnect).await
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.snapshot.borrow().transcript.clone()
    }

    /// Wait until the session reaches `status`
    pub async fn wait_for_status(&self, status: CallStatus) -> Result<SessionSnapshot> {
        self.wait_until(|s| s.status == status).await
    }

    /// Wait until at least `entries` transcript lines have been recorded
    pub async fn wait_for_transcript(&self, entries: usize) -> Result<SessionSnapshot> {
        self.wait_until(|s| s.transcript_entries >= entries).await
    }

    /// Wait for the post-call procedure and return where it routed, if anywhere
    pub async fn wait_for_dispatch(&self) -> Result<Option<Route>> {
        Ok(self.wait_until(|s| s.dispatch_complete).await?.route)
    }

    /// Stop the controller task
    pub async fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown).await;
    }

    async fn wait_until(
        &self,
        predicate: impl FnMut(&SessionSnapshot) -> bool,
    ) -> Result<SessionSnapshot> {
        let mut rx = self.snapshot.clone();
        let snapshot = rx
            .wait_for(predicate)
            .await
            .map_err(|_| Error::InvalidState("session controller stopped".to_string()))?;
        Ok(snapshot.clone())
    }

    async fn request(
        &self,
        command: impl FnOnce(oneshot::Sender<Result<()>>) -> Command,
    ) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(command(reply_tx))
            .await
            .map_err(|_| Error::InvalidState("session controller stopped".to_string()))?;
        reply_rx
            .await
            .map_err(|_| Error::InvalidState("session controller stopped".to_string()))?
    }
}
