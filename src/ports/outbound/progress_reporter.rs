/// ProgressReporter port for reporting progress during operations
///
/// This port abstracts progress reporting (e.g., to stderr)
/// to provide user feedback while the graph is being resolved.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports that another package has been resolved
    ///
    /// The total is unknown up front, so only a running count is given.
    ///
    /// # Arguments
    /// * `resolved` - Number of packages resolved so far
    /// * `current` - Package that was just resolved
    fn report_tick(&self, resolved: usize, current: &str);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
