//! Completed-game record codec.
//!
//! The engine never persists board state; what the history layer stores is the
//! terminal tuple of a finished game (players, final count, winner, when). The
//! byte layout is `magic | version | crc32 | payload`, all integers
//! little-endian, with the CRC computed over the payload alone.

use web_time::{SystemTime, UNIX_EPOCH};

use crate::error::RecordError;
use crate::types::{GameResult, Winner};

const MAGIC: &[u8; 4] = b"ORVH";
const VERSION: u32 = 1;
const HEADER_SIZE: usize = 12;

/// One finished game, as the history layer stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub black_name: String,
    pub white_name: String,
    pub black_score: u8,
    pub white_score: u8,
    pub winner: Winner,
    /// Completion time, unix milliseconds.
    pub timestamp_ms: u64,
}

impl GameRecord {
    /// Builds a record for a finished game, stamped with the current time.
    pub fn new(black_name: &str, white_name: &str, result: GameResult) -> Self {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default();

        Self {
            black_name: black_name.to_string(),
            white_name: white_name.to_string(),
            black_score: result.black,
            white_score: result.white,
            winner: result.winner,
            timestamp_ms,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut payload = Vec::new();
        payload.extend_from_slice(&self.timestamp_ms.to_le_bytes());
        payload.push(winner_tag(self.winner));
        payload.push(self.black_score);
        payload.push(self.white_score);
        for name in [&self.black_name, &self.white_name] {
            payload.extend_from_slice(&(name.len() as u32).to_le_bytes());
            payload.extend_from_slice(name.as_bytes());
        }

        let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&VERSION.to_le_bytes());
        out.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
        out.extend_from_slice(&payload);
        out
    }

    pub fn decode(data: &[u8]) -> Result<Self, RecordError> {
        if data.len() < HEADER_SIZE {
            return Err(RecordError::TooShort {
                expected: HEADER_SIZE,
                got: data.len(),
            });
        }

        if &data[0..4] != MAGIC {
            return Err(RecordError::BadMagic);
        }

        let version = read_u32_le(data, 4)?;
        if version != VERSION {
            return Err(RecordError::UnsupportedVersion {
                expected: VERSION,
                got: version,
            });
        }

        let expected_crc = read_u32_le(data, 8)?;
        let payload = &data[HEADER_SIZE..];
        let actual_crc = crc32fast::hash(payload);
        if actual_crc != expected_crc {
            return Err(RecordError::CrcMismatch {
                expected: expected_crc,
                got: actual_crc,
            });
        }

        let mut reader = Reader {
            data: payload,
            offset: 0,
        };
        let timestamp_ms = reader.read_u64("timestamp")?;
        let winner = match reader.read_u8("winner")? {
            0 => Winner::Tie,
            1 => Winner::Black,
            2 => Winner::White,
            other => return Err(RecordError::InvalidWinner(other)),
        };
        let black_score = reader.read_u8("black score")?;
        let white_score = reader.read_u8("white score")?;
        let black_name = reader.read_string("black player name")?;
        let white_name = reader.read_string("white player name")?;

        if reader.offset != payload.len() {
            return Err(RecordError::TrailingBytes);
        }

        Ok(Self {
            black_name,
            white_name,
            black_score,
            white_score,
            winner,
            timestamp_ms,
        })
    }
}

fn winner_tag(winner: Winner) -> u8 {
    match winner {
        Winner::Tie => 0,
        Winner::Black => 1,
        Winner::White => 2,
    }
}

fn read_u32_le(data: &[u8], offset: usize) -> Result<u32, RecordError> {
    let bytes = data
        .get(offset..offset + 4)
        .ok_or(RecordError::Truncated("header"))?;
    Ok(u32::from_le_bytes(bytes.try_into().expect("4-byte slice")))
}

/// Offset-walking payload reader; every shortfall names the field it hit.
struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl Reader<'_> {
    fn take(&mut self, len: usize, field: &'static str) -> Result<&[u8], RecordError> {
        let end = self
            .offset
            .checked_add(len)
            .ok_or(RecordError::Truncated(field))?;
        let bytes = self
            .data
            .get(self.offset..end)
            .ok_or(RecordError::Truncated(field))?;
        self.offset = end;
        Ok(bytes)
    }

    fn read_u8(&mut self, field: &'static str) -> Result<u8, RecordError> {
        Ok(self.take(1, field)?[0])
    }

    fn read_u64(&mut self, field: &'static str) -> Result<u64, RecordError> {
        let bytes = self.take(8, field)?;
        Ok(u64::from_le_bytes(bytes.try_into().expect("8-byte slice")))
    }

    fn read_string(&mut self, field: &'static str) -> Result<String, RecordError> {
        let len_bytes = self.take(4, field)?;
        let len = u32::from_le_bytes(len_bytes.try_into().expect("4-byte slice")) as usize;
        let bytes = self.take(len, field)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| RecordError::InvalidUtf8(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> GameRecord {
        GameRecord {
            black_name: "Ada".to_string(),
            white_name: "Haskell".to_string(),
            black_score: 34,
            white_score: 30,
            winner: Winner::Black,
            timestamp_ms: 1_724_400_000_000,
        }
    }

    #[test]
    fn encode_then_decode_preserves_the_record() {
        let record = sample_record();
        let decoded = GameRecord::decode(&record.encode()).expect("must decode");
        assert_eq!(decoded, record);
    }

    #[test]
    fn new_stamps_a_nonzero_completion_time() {
        let record = GameRecord::new(
            "Black",
            "White",
            GameResult {
                winner: Winner::Tie,
                black: 32,
                white: 32,
            },
        );

        assert!(record.timestamp_ms > 0);
        assert_eq!(record.winner, Winner::Tie);
    }

    #[test]
    fn decode_rejects_bad_magic() {
        let mut bytes = sample_record().encode();
        bytes[0] = b'X';
        assert_eq!(GameRecord::decode(&bytes), Err(RecordError::BadMagic));
    }

    #[test]
    fn decode_rejects_unsupported_version() {
        let mut bytes = sample_record().encode();
        bytes[4..8].copy_from_slice(&2u32.to_le_bytes());
        assert_eq!(
            GameRecord::decode(&bytes),
            Err(RecordError::UnsupportedVersion {
                expected: 1,
                got: 2
            })
        );
    }

    #[test]
    fn decode_rejects_corrupted_payload() {
        let mut bytes = sample_record().encode();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;

        assert!(matches!(
            GameRecord::decode(&bytes),
            Err(RecordError::CrcMismatch { .. })
        ));
    }

    #[test]
    fn decode_rejects_truncated_name_with_a_named_field() {
        let mut bytes = sample_record().encode();
        bytes.pop();
        // Re-seal the shortened payload so the CRC passes and the length
        // check itself is what fails.
        let crc = crc32fast::hash(&bytes[HEADER_SIZE..]);
        bytes[8..12].copy_from_slice(&crc.to_le_bytes());

        assert_eq!(
            GameRecord::decode(&bytes),
            Err(RecordError::Truncated("white player name"))
        );
    }

    #[test]
    fn decode_rejects_trailing_bytes() {
        let mut bytes = sample_record().encode();
        bytes.push(0);
        let crc = crc32fast::hash(&bytes[HEADER_SIZE..]);
        bytes[8..12].copy_from_slice(&crc.to_le_bytes());

        assert_eq!(GameRecord::decode(&bytes), Err(RecordError::TrailingBytes));
    }

    #[test]
    fn decode_rejects_invalid_winner_tag() {
        let mut bytes = sample_record().encode();
        bytes[HEADER_SIZE + 8] = 9;
        let crc = crc32fast::hash(&bytes[HEADER_SIZE..]);
        bytes[8..12].copy_from_slice(&crc.to_le_bytes());

        assert_eq!(GameRecord::decode(&bytes), Err(RecordError::InvalidWinner(9)));
    }

    #[test]
    fn record_too_short_for_a_header_is_rejected() {
        assert_eq!(
            GameRecord::decode(b"ORVH"),
            Err(RecordError::TooShort {
                expected: HEADER_SIZE,
                got: 4
            })
        );
    }
}
