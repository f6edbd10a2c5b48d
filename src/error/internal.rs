use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A stored password hash failed to parse back into PHC format.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to the client.
    #[error("Stored password hash for user {user_id} is not valid PHC: {reason}")]
    MalformedPasswordHash { user_id: i32, reason: String },
}
