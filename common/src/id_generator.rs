use rand::Rng;

use crate::SessionId;

const SESSION_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const SESSION_CODE_LENGTH: usize = 6;

pub fn generate_session_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| SESSION_CODE_ALPHABET[rng.random_range(0..SESSION_CODE_ALPHABET.len())] as char)
        .collect()
}

/// Draws session codes until `is_taken` rejects none of them.
pub fn generate_session_id(mut is_taken: impl FnMut(&SessionId) -> bool) -> SessionId {
    loop {
        let candidate = SessionId::new(generate_session_code(SESSION_CODE_LENGTH));
        if !is_taken(&candidate) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_code_shape() {
        let code = generate_session_code(SESSION_CODE_LENGTH);
        assert_eq!(code.len(), SESSION_CODE_LENGTH);
        assert!(code.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
    }

    #[test]
    fn test_generate_session_id_skips_taken_codes() {
        let mut calls = 0;
        let id = generate_session_id(|_| {
            calls += 1;
            calls < 3
        });
        assert_eq!(calls, 3);
        assert_eq!(id.as_str().len(), SESSION_CODE_LENGTH);
    }
}
