pub mod load_facts;
pub mod publish;

pub use load_facts::fetch_facts;
pub use publish::{
    PublishAction, PublishOutcome, PUBLISH_ACTION, REFRESH_FAILED_MESSAGE, UPDATE_SUCCESS_MESSAGE,
};
