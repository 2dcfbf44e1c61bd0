//! DC prediction (DPCM)
//!
//! Each block's DC coefficient is replaced by its difference from the
//! previous block's DC in row-major block order. The first block keeps its
//! absolute value. AC coefficients are left untouched.
//!
//! Arithmetic wraps in two's complement, so decoding inverts encoding exactly
//! for every `i32` sequence.

use crate::error::Result;
use crate::plane::Plane;

/// Differences of a DC sequence: `d[0] = dc[0]`, `d[k] = dc[k] - dc[k - 1]`.
pub fn encode_dc(dc: &[i32]) -> Vec<i32> {
    let mut previous = 0i32;
    dc.iter()
        .map(|&current| {
            let diff = current.wrapping_sub(previous);
            previous = current;
            diff
        })
        .collect()
}

/// Prefix sum of a difference sequence, inverting [`encode_dc`].
pub fn decode_dc(diffs: &[i32]) -> Vec<i32> {
    let mut running = 0i32;
    diffs
        .iter()
        .map(|&diff| {
            running = running.wrapping_add(diff);
            running
        })
        .collect()
}

/// DC coefficients of every `block_size` block in row-major block order.
pub fn dc_coefficients(plane: &Plane<i32>, block_size: usize) -> Result<Vec<i32>> {
    plane.ensure_block_aligned(block_size, "dc prediction")?;
    let mut dc = Vec::with_capacity(plane.block_rows(block_size) * plane.block_cols(block_size));
    for br in 0..plane.block_rows(block_size) {
        for bc in 0..plane.block_cols(block_size) {
            dc.push(plane.get(br * block_size, bc * block_size));
        }
    }
    Ok(dc)
}

fn replace_dc(plane: &Plane<i32>, block_size: usize, dc: &[i32]) -> Plane<i32> {
    let mut out = plane.clone();
    let cols = plane.block_cols(block_size);
    for (k, &value) in dc.iter().enumerate() {
        let (br, bc) = (k / cols, k % cols);
        out.set(br * block_size, bc * block_size, value);
    }
    out
}

/// Replace each block's DC with its DPCM difference.
pub fn predict_dc(plane: &Plane<i32>, block_size: usize) -> Result<Plane<i32>> {
    let dc = dc_coefficients(plane, block_size)?;
    Ok(replace_dc(plane, block_size, &encode_dc(&dc)))
}

/// Restore absolute DC values from DPCM differences.
pub fn unpredict_dc(plane: &Plane<i32>, block_size: usize) -> Result<Plane<i32>> {
    let diffs = dc_coefficients(plane, block_size)?;
    Ok(replace_dc(plane, block_size, &decode_dc(&diffs)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_block_sequence() {
        assert_eq!(encode_dc(&[226, 223]), vec![226, -3]);
        assert_eq!(decode_dc(&[226, -3]), vec![226, 223]);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(encode_dc(&[]).is_empty());
        assert!(decode_dc(&[]).is_empty());
        assert_eq!(encode_dc(&[-7]), vec![-7]);
        assert_eq!(decode_dc(&encode_dc(&[-7])), vec![-7]);
    }

    #[test]
    fn test_roundtrip_extremes() {
        let seq = [i32::MAX, i32::MIN, 0, -1, i32::MAX, 5, i32::MIN];
        assert_eq!(decode_dc(&encode_dc(&seq)), seq.to_vec());
    }

    #[test]
    fn test_roundtrip_pseudo_random() {
        let mut state = 0x2545_f491u32;
        let seq: Vec<i32> = (0..500)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state % 4096) as i32 - 2048
            })
            .collect();
        assert_eq!(decode_dc(&encode_dc(&seq)), seq);
    }

    #[test]
    fn test_plane_prediction_touches_only_dc() {
        // 2x2 blocks with DC 10, 15, 12, 20 and a marker AC value
        let mut plane = Plane::<i32>::new(16, 16);
        for (k, dc) in [10, 15, 12, 20].into_iter().enumerate() {
            let (br, bc) = (k / 2, k % 2);
            plane.set(br * 8, bc * 8, dc);
            plane.set(br * 8 + 1, bc * 8 + 2, 99);
        }

        let predicted = predict_dc(&plane, 8).unwrap();
        assert_eq!(dc_coefficients(&predicted, 8).unwrap(), vec![10, 5, -3, 8]);
        assert_eq!(predicted.get(1, 2), 99);
        assert_eq!(predicted.get(9, 10), 99);

        let restored = unpredict_dc(&predicted, 8).unwrap();
        assert_eq!(restored, plane);
    }
}
