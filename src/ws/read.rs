use anyhow::Result;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::frame::{Frame, Headers, Opcode, LENGTH_MASK};

async fn read_length_u16<T: AsyncRead + Unpin>(reader: &mut T) -> Result<usize> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf).await?;
    Ok(u16::from_be_bytes(buf) as usize)
}

async fn read_length_u64<T: AsyncRead + Unpin>(reader: &mut T) -> Result<usize> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf).await?;
    Ok(u64::from_be_bytes(buf) as usize)
}

async fn read_mask<T: AsyncRead + Unpin>(reader: &mut T) -> Result<[u8; 4]> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf).await?;
    Ok(buf)
}

pub async fn read_frame<T: AsyncRead + Unpin>(reader: &mut T) -> Result<Frame> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf).await?;
    let headers = Headers::decode(buf[0], buf[1]);
    let opcode = Opcode::decode(buf[0]);

    let length = match buf[1] & LENGTH_MASK {
        value @ 0..=125 => value as usize,
        126 => read_length_u16(reader).await?,
        127 => read_length_u64(reader).await?,
        // as length is 7 bit, this should never panic
        value => panic!("Unexpected length value {:#X}", value),
    };
    let maybe_mask = if headers.mask {
        Some(read_mask(reader).await?)
    } else {
        None
    };

    let mut payload = vec![0; length];
    reader.read_exact(&mut payload).await?;

    if let Some(mask) = maybe_mask {
        // unmasking the message
        for i in 0..payload.len() {
            payload[i] ^= mask[i % 4];
        }
    }

    Ok(Frame {
        headers,
        opcode,
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ws::frame::{FIN_MASK, MASKED_MASK};

    fn masked_frame(opcode: Opcode, payload: &[u8]) -> Vec<u8> {
        assert!(payload.len() <= 125);
        let mask = [0x13, 0x57, 0x9b, 0xdf];
        let mut frame = vec![opcode.encode() | FIN_MASK, payload.len() as u8 | MASKED_MASK];
        frame.extend_from_slice(&mask);
        for (i, byte) in payload.iter().enumerate() {
            frame.push(byte ^ mask[i % 4]);
        }
        frame
    }

    #[tokio::test]
    async fn reads_masked_text_frame() {
        let bytes = masked_frame(Opcode::Text, b"hello there");
        let frame = read_frame(&mut &bytes[..]).await.unwrap();
        assert_eq!(frame.opcode, Opcode::Text);
        assert!(frame.headers.fin);
        assert!(frame.headers.mask);
        assert_eq!(frame.payload, b"hello there");
    }

    #[tokio::test]
    async fn reads_unmasked_frame() {
        let bytes = [&[Opcode::Text.encode() | FIN_MASK, 2][..], b"hi"].concat();
        let frame = read_frame(&mut &bytes[..]).await.unwrap();
        assert!(!frame.headers.mask);
        assert_eq!(frame.payload, b"hi");
    }

    #[tokio::test]
    async fn reads_extended_u16_length() {
        let payload = vec![0xAB; 300];
        let bytes = [
            &[Opcode::Binary.encode() | FIN_MASK, 126][..],
            &300u16.to_be_bytes(),
            &payload,
        ]
        .concat();
        let frame = read_frame(&mut &bytes[..]).await.unwrap();
        assert_eq!(frame.opcode, Opcode::Binary);
        assert_eq!(frame.payload, payload);
    }

    #[tokio::test]
    async fn reads_close_frame() {
        let bytes = masked_frame(Opcode::Close, b"");
        let frame = read_frame(&mut &bytes[..]).await.unwrap();
        assert_eq!(frame.opcode, Opcode::Close);
        assert!(frame.payload.is_empty());
    }

    #[tokio::test]
    async fn fails_on_truncated_frame() {
        let bytes = [Opcode::Text.encode() | FIN_MASK, 10, b'x'];
        assert!(read_frame(&mut &bytes[..]).await.is_err());
    }
}
