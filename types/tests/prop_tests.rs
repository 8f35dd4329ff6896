use proptest::prelude::*;

use votechain_types::{CandidateInfo, PublicKey, Timestamp};

proptest! {
    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Timestamp bincode serialization roundtrip.
    #[test]
    fn timestamp_bincode_roundtrip(secs in any::<u64>()) {
        let ts = Timestamp::new(secs);
        let encoded = bincode::serialize(&ts).unwrap();
        let decoded: Timestamp = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, ts);
    }

    /// PublicKey hex display is always 64 lowercase hex digits.
    #[test]
    fn public_key_display_is_hex(bytes in prop::array::uniform32(0u8..)) {
        let shown = PublicKey(bytes).to_string();
        prop_assert_eq!(shown.len(), 64);
        prop_assert!(shown.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    /// CandidateInfo survives JSON encoding with arbitrary text.
    #[test]
    fn candidate_json_roundtrip(id in "[A-Za-z0-9]{1,12}", name in ".{0,24}", party in ".{0,24}") {
        let candidate = CandidateInfo::new(id, name, party);
        let json = serde_json::to_string(&candidate).unwrap();
        let decoded: CandidateInfo = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(decoded, candidate);
    }
}
