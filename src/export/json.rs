use crate::error::EncodingError;
use crate::export::snapshot::{Snapshot, VotersByOption};

/// JSON object mapping option text to voter names, keys in option order.
pub fn encode(snapshot: &Snapshot) -> Result<Vec<u8>, EncodingError> {
    Ok(serde_json::to_vec(&VotersByOption(snapshot))?)
}
