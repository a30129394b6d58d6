use storefront_core::config::LoadOptions;
use storefront_core::domain::contact::RfqContactInfo;
use storefront_core::RfqComposer;

use crate::commands::{load_config, open_store, CommandResult};

pub fn run(options: &LoadOptions, contact: RfqContactInfo) -> CommandResult {
    let config = match load_config("rfq", options) {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let store = open_store(&config);
    let composer = RfqComposer::new(config.rfq);

    match composer.place_rfq(&store, &contact) {
        Ok(submission) => {
            let message = format!("{} ready to send", submission.rfq_number);
            CommandResult::success_with("rfq", message, submission)
        }
        Err(error) => CommandResult::from_application_error("rfq", &error),
    }
}
