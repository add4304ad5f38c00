//! Binary record layout for trajectory and energy series.
//!
//! One record per sample, contiguous little-endian IEEE-754 doubles, no
//! header, no delimiter:
//! - state record:  `[time, x, v]`, `DIM * 8` bytes
//! - energy record: `[time, energy]`, 16 bytes
//!
//! File length is therefore an exact multiple of the record width; the
//! dimension is known to consumers out of band.

use osc_core::{DIM, Real, State};

use crate::{ResultsError, ResultsResult};

/// Bytes per trajectory sample.
pub const STATE_RECORD_WIDTH: usize = DIM * 8;

/// Bytes per energy sample.
pub const ENERGY_RECORD_WIDTH: usize = 2 * 8;

/// Encode a trajectory into contiguous state records.
pub fn encode_states(states: &[State]) -> Vec<u8> {
    let mut out = Vec::with_capacity(states.len() * STATE_RECORD_WIDTH);
    for s in states {
        for i in 0..DIM {
            out.extend_from_slice(&s[i].to_le_bytes());
        }
    }
    out
}

/// Decode contiguous state records.
pub fn decode_states(bytes: &[u8]) -> ResultsResult<Vec<State>> {
    if bytes.len() % STATE_RECORD_WIDTH != 0 {
        return Err(ResultsError::MalformedRecord {
            what: "state data not a multiple of the record width",
            len: bytes.len(),
        });
    }
    Ok(bytes
        .chunks_exact(STATE_RECORD_WIDTH)
        .map(|record| {
            State::from_fn(|i, _| {
                let mut buf = [0_u8; 8];
                buf.copy_from_slice(&record[i * 8..(i + 1) * 8]);
                Real::from_le_bytes(buf)
            })
        })
        .collect())
}

/// Encode `(time, energy)` pairs into contiguous energy records.
pub fn encode_energy(series: &[(Real, Real)]) -> Vec<u8> {
    let mut out = Vec::with_capacity(series.len() * ENERGY_RECORD_WIDTH);
    for (t, e) in series {
        out.extend_from_slice(&t.to_le_bytes());
        out.extend_from_slice(&e.to_le_bytes());
    }
    out
}

/// Decode contiguous energy records.
pub fn decode_energy(bytes: &[u8]) -> ResultsResult<Vec<(Real, Real)>> {
    if bytes.len() % ENERGY_RECORD_WIDTH != 0 {
        return Err(ResultsError::MalformedRecord {
            what: "energy data not a multiple of the record width",
            len: bytes.len(),
        });
    }
    Ok(bytes
        .chunks_exact(ENERGY_RECORD_WIDTH)
        .map(|record| {
            let mut t = [0_u8; 8];
            let mut e = [0_u8; 8];
            t.copy_from_slice(&record[..8]);
            e.copy_from_slice(&record[8..]);
            (Real::from_le_bytes(t), Real::from_le_bytes(e))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use osc_core::state;

    #[test]
    fn state_records_round_trip() {
        let states = vec![state(0.0, 1.0, 0.0), state(0.01, 0.9999, -0.01)];
        let bytes = encode_states(&states);
        assert_eq!(bytes.len(), 2 * STATE_RECORD_WIDTH);
        assert_eq!(decode_states(&bytes).unwrap(), states);
    }

    #[test]
    fn energy_records_round_trip() {
        let series = vec![(0.0, 0.5), (0.01, 0.5000001)];
        let bytes = encode_energy(&series);
        assert_eq!(bytes.len(), 2 * ENERGY_RECORD_WIDTH);
        assert_eq!(decode_energy(&bytes).unwrap(), series);
    }

    #[test]
    fn truncated_data_is_rejected() {
        let bytes = encode_states(&[state(0.0, 1.0, 0.0)]);
        let err = decode_states(&bytes[..STATE_RECORD_WIDTH - 3]).unwrap_err();
        assert!(matches!(err, ResultsError::MalformedRecord { .. }));

        let err = decode_energy(&[0_u8; ENERGY_RECORD_WIDTH + 1]).unwrap_err();
        assert!(matches!(err, ResultsError::MalformedRecord { .. }));
    }

    #[test]
    fn empty_series_encode_to_empty_files() {
        assert!(encode_states(&[]).is_empty());
        assert_eq!(decode_states(&[]).unwrap(), Vec::<State>::new());
    }
}
