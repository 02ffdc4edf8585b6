use tokio::task::JoinHandle;
use tracing::error;
use uuid::Uuid;

use crate::domain::common::entities::app_errors::CoreError;

/// Handle on a scheduled bulk rescreen.
///
/// Dropping the ticket detaches the run; awaiting [`RescreenTicket::wait`]
/// yields the number of analyses the run attempted.
#[derive(Debug)]
pub struct RescreenTicket {
    user_id: Uuid,
    handle: JoinHandle<Result<usize, CoreError>>,
}

impl RescreenTicket {
    pub fn new(user_id: Uuid, handle: JoinHandle<Result<usize, CoreError>>) -> Self {
        Self { user_id, handle }
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub async fn wait(self) -> Result<usize, CoreError> {
        let user_id = self.user_id;

        self.handle.await.map_err(|e| {
            error!(user_id = %user_id, "Rescreen task did not complete: {}", e);
            CoreError::InternalServerError
        })?
    }
}
