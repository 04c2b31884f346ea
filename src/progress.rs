//! 呼び出し中のスピナー表示

use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

/// スピナーを表示しながらfutureを待つ
pub async fn with_spinner<F: Future>(message: &str, future: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = future.await;
    spinner.finish_and_clear();
    output
}
