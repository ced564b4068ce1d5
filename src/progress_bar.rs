use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

pub fn get_progress_bar(length: u64) -> ProgressBar {
    let bar = ProgressBar::new(length);
    #[cfg(test)]
    bar.set_draw_target(ProgressDrawTarget::hidden());
    if let Ok(style) = ProgressStyle::with_template(
        "[{elapsed_precise}] {bar:41.cyan/blue}  {human_pos:>7}/{human_len:7} {msg}",
    ) {
        bar.set_style(style);
    }
    bar
}

/// A bar that draws nothing, for output that is not a terminal.
pub fn get_hidden_bar(length: u64) -> ProgressBar {
    ProgressBar::with_draw_target(Some(length), ProgressDrawTarget::hidden())
}
