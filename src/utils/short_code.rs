use nanoid::nanoid;

pub const SHORT_CODE_LEN: usize = 8;

/// Random URL-safe token (`A-Za-z0-9_-`). Uniqueness rests on the collision
/// odds of the alphabet; nothing checks the store.
pub fn generate_short_code() -> String {
    nanoid!(SHORT_CODE_LEN)
}
