//! Rank/select laws checked against a naive oracle.

use proptest::prelude::*;

use owlex::trie::bits::{decode_varint, encode_varint, BitVec, RankSelect};

fn rank_select(bits: &[bool]) -> RankSelect {
    let mut bv = BitVec::new();
    for &b in bits {
        bv.push(b);
    }
    RankSelect::build(bv)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: rank1 over [0, i] matches a prefix count.
    #[test]
    fn prop_rank_matches_oracle(bits in prop::collection::vec(any::<bool>(), 1..600)) {
        let rs = rank_select(&bits);
        let mut ones = 0u32;
        for (i, &b) in bits.iter().enumerate() {
            if b {
                ones += 1;
            }
            prop_assert_eq!(rs.rank1(i as u32), ones);
            prop_assert_eq!(rs.rank0(i as u32), i as u32 + 1 - ones);
        }
    }

    /// Property: select1(rank1(i)) = i at every set bit, and symmetrically
    /// for clear bits.
    #[test]
    fn prop_select_inverts_rank(bits in prop::collection::vec(any::<bool>(), 1..600)) {
        let rs = rank_select(&bits);
        for (i, &b) in bits.iter().enumerate() {
            let i = i as u32;
            if b {
                prop_assert_eq!(rs.select1(rs.rank1(i)), Some(i));
            } else {
                prop_assert_eq!(rs.select0(rs.rank0(i)), Some(i));
            }
        }
        let ones = rs.count_ones();
        prop_assert_eq!(rs.select1(ones + 1), None);
        prop_assert_eq!(rs.select0(rs.len() - ones + 1), None);
    }

    /// Property: varint encoding is reversible and self-terminating.
    #[test]
    fn prop_varint_roundtrip(value: u32) {
        let mut buf = Vec::new();
        encode_varint(value, &mut buf);
        let (decoded, used) = decode_varint(&buf).unwrap();
        prop_assert_eq!(decoded, value);
        prop_assert_eq!(used, buf.len());
        // Continuation bits: set on all but the last byte.
        for (i, &byte) in buf.iter().enumerate() {
            prop_assert_eq!(byte & 0x80 != 0, i + 1 < buf.len());
        }
    }

    /// Property: concatenated varints decode back to the same sequence.
    #[test]
    fn prop_varint_stream(values in prop::collection::vec(any::<u32>(), 0..50)) {
        let mut buf = Vec::new();
        for &v in &values {
            encode_varint(v, &mut buf);
        }
        let mut decoded = Vec::new();
        let mut pos = 0;
        while pos < buf.len() {
            let (v, used) = decode_varint(&buf[pos..]).unwrap();
            decoded.push(v);
            pos += used;
        }
        prop_assert_eq!(decoded, values);
    }
}
