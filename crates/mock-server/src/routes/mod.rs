use std::time::Duration;

use rand::Rng;

pub mod gemini;

pub(crate) async fn sleep(latency: u32) {
    let n: u32 = {
        let mut rng = rand::rng();
        let delta = 10;
        let range = latency.saturating_sub(delta)..=(latency + delta);
        rng.random_range(range)
    };
    tokio::time::sleep(Duration::from_millis(n.into())).await;
}
