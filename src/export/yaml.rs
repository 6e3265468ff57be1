use crate::error::EncodingError;
use crate::export::snapshot::{Snapshot, VotersByOption};

/// YAML document mapping option text to voter names, keys in option order.
pub fn encode(snapshot: &Snapshot) -> Result<Vec<u8>, EncodingError> {
    let doc = serde_yaml::to_string(&VotersByOption(snapshot))?;
    Ok(doc.into_bytes())
}
