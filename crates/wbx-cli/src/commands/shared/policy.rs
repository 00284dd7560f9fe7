use wbx_config::TransferConfig;
use wbx_transfer::FailurePolicy;

/// `--continue-on-error` wins over `transfer.stop_on_error`.
pub const fn resolve(config: &TransferConfig, continue_on_error: bool) -> FailurePolicy {
    if continue_on_error {
        FailurePolicy::ContinueOnError
    } else {
        FailurePolicy::from_stop_on_error(config.stop_on_error)
    }
}
