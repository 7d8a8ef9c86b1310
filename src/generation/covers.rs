use rand::seq::SliceRandom;

const COVERS: &[&str] = &[
    "/adobe.png",
    "/amazon.png",
    "/facebook.png",
    "/hostinger.png",
    "/pinterest.png",
    "/quora.png",
    "/reddit.png",
    "/skype.png",
    "/spotify.png",
    "/telegram.png",
    "/tiktok.png",
    "/yahoo.png",
];

/// Random cover image path for a new interview
pub fn random_cover() -> String {
    let cover = COVERS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("/adobe.png");
    format!("/covers{}", cover)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_is_from_the_set() {
        for _ in 0..20 {
            let cover = random_cover();
            let name = cover.strip_prefix("/covers").unwrap();
            assert!(COVERS.contains(&name));
        }
    }
}
