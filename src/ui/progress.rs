use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const FILE_BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} logs scanned ({eta})";

/// Progress bar over the log files of one aggregation run.
///
/// Drawn on stderr so stdout keeps only the run summary.
pub struct ProgressReporter {
    file_progress: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            file_progress: None,
            enabled,
        }
    }

    pub fn start_file_processing(&mut self, total_files: usize) {
        if !self.enabled {
            return;
        }

        let pb = ProgressBar::with_draw_target(
            Some(total_files as u64),
            ProgressDrawTarget::stderr(),
        );
        pb.set_style(
            ProgressStyle::default_bar()
                .template(FILE_BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message("Scanning run logs");
        self.file_progress = Some(pb);
    }

    pub fn update_file_progress(&self, current: usize) {
        if let Some(ref pb) = self.file_progress {
            pb.set_position(current as u64);
        }
    }

    pub fn finish_file_processing(&self) {
        if let Some(ref pb) = self.file_progress {
            pb.finish_and_clear();
        }
    }
}
