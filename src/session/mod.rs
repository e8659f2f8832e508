// session/mod.rs - Typed access to the caller identity held in the session
//
// The login flow (outside this service) writes the identity keys below. This
// module only reads the caller id and, in operator mode, resets the identity.

use serde_json::{json, Value};
use tower_sessions::{session, Session};

/// Account identifier of the signed-in caller
pub const CALLER_ID_KEY: &str = "VATSIM_CID";
pub const FIRST_NAME_KEY: &str = "VATSIM_FIRST_NAME";
pub const LAST_NAME_KEY: &str = "VATSIM_LAST_NAME";

/// Value written to every identity field by the operator bypass
pub const IDENTITY_SENTINEL: i64 = 0;

/// Explicit handle on one client's session, passed in by the session layer
#[derive(Clone, Debug)]
pub struct SessionIdentity {
    session: Session,
}

impl SessionIdentity {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Caller id from the session, if one is present and numeric.
    ///
    /// Login stores the id as a string; plain JSON integers are accepted too.
    pub async fn caller_id(&self) -> Result<Option<i64>, session::Error> {
        let value: Option<Value> = self.session.get(CALLER_ID_KEY).await?;
        Ok(value.as_ref().and_then(parse_caller_id))
    }

    /// Overwrite first name, last name and caller id with the sentinel.
    pub async fn reset_to_sentinel(&self) -> Result<(), session::Error> {
        for key in [FIRST_NAME_KEY, LAST_NAME_KEY, CALLER_ID_KEY] {
            self.session.insert(key, json!(IDENTITY_SENTINEL)).await?;
        }
        Ok(())
    }
}

fn parse_caller_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
