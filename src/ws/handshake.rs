use sha1::{Digest, Sha1};

const WS_MAGIC_CONST: &[u8] = b"258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

fn sha1(msg: &[u8]) -> [u8; 20] {
    let mut hasher = Sha1::new();
    hasher.update(msg);
    hasher.finalize().into()
}

/// Computes the Sec-WebSocket-Accept value for a Sec-WebSocket-Key.
pub fn accept_key(input: &[u8]) -> String {
    let concatenated = [input, WS_MAGIC_CONST].concat();
    let hash = sha1(&concatenated);
    base64::encode(&hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_rfc_6455_sample() {
        let accept = accept_key(b"dGhlIHNhbXBsZSBub25jZQ==");
        assert_eq!(accept, "s3pPLMBiTxaQ9kYGzzhZRbK+xOo=");
    }
}
