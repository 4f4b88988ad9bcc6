/***
success 0
common  1-99
referral api 100
*/

use thiserror::Error;

pub trait ErrorCode {
    fn code(&self) -> u16;
}

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("internal error: {0}")]
    InternalError(String),
    #[error("Db error: {0}")]
    DBError(String),
    #[error("Authorization error: {0}")]
    Authorization(String),
}

impl ErrorCode for BackendError {
    fn code(&self) -> u16 {
        match self {
            Self::InternalError(_) => 1,
            Self::DBError(_) => 3,
            Self::Authorization(_) => 5,
        }
    }
}

//None is "successfully" with empty data
pub type BackendRes<D, E = BackendError> = Result<Option<D>, E>;
