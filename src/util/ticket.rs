use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::debug;

/// Leading tag of every ticket id.
pub const TICKET_PREFIX: &str = "QT";
/// Length of the random tail.
pub const TICKET_SUFFIX_LEN: usize = 6;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a ticket id for a request accepted right now, e.g. `QT-MGW3K9X1-A1B2C3`.
///
/// Built from wall-clock milliseconds and a random suffix. Nothing checks the id
/// against stored records, so two ids can collide in principle.
pub fn generate_ticket_id() -> String {
    generate_ticket_id_at(Utc::now())
}

pub fn generate_ticket_id_at(now: DateTime<Utc>) -> String {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let mut rng = rand::thread_rng();
    let suffix: String = (0..TICKET_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();

    let ticket_id = format!("{}-{}-{}", TICKET_PREFIX, to_base36(millis), suffix).to_uppercase();
    debug!(ticket_id = %ticket_id, "Generated ticket id");
    ticket_id
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    // only ASCII digits and letters were pushed
    digits.into_iter().map(char::from).collect()
}
