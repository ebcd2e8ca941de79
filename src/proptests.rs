use ::md5::{Digest as _, Md5 as ReferenceMd5};
use proptest::prelude::*;

use crate::{md5_hex, Md5};

proptest! {
    #[test]
    fn digest_matches_reference(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
        let ours = Md5::digest_message(&data).unwrap();
        let reference = ReferenceMd5::digest(&data);
        prop_assert_eq!(ours.as_bytes().as_slice(), reference.as_slice());
    }

    #[test]
    fn chunking_does_not_change_digest(
        data in proptest::collection::vec(any::<u8>(), 0..=4096),
        split in any::<usize>(),
        chunk in 1usize..=257
    ) {
        let split = split % (data.len() + 1);
        let (a, b) = data.split_at(split);

        let oneshot = Md5::digest_message(&data).unwrap();

        let mut hasher = Md5::new();
        for part in a.chunks(chunk) {
            hasher.update(part).unwrap();
        }
        for part in b.chunks(chunk) {
            hasher.update(part).unwrap();
        }
        prop_assert_eq!(hasher.finalize(), oneshot);
    }

    #[test]
    fn arbitrary_partitions_do_not_change_digest(
        data in proptest::collection::vec(any::<u8>(), 0..=1024),
        cuts in proptest::collection::vec(any::<usize>(), 0..=16)
    ) {
        let mut cuts: Vec<usize> = cuts.into_iter().map(|c| c % (data.len() + 1)).collect();
        cuts.push(0);
        cuts.push(data.len());
        cuts.sort_unstable();

        let mut hasher = Md5::new();
        for window in cuts.windows(2) {
            hasher.update(&data[window[0]..window[1]]).unwrap();
        }
        prop_assert_eq!(hasher.finalize(), Md5::digest_message(&data).unwrap());
    }

    #[test]
    fn hex_digest_is_32_lowercase_chars(text in ".*") {
        let hex = md5_hex(&text).unwrap();
        prop_assert_eq!(hex.len(), 32);
        prop_assert!(hex.bytes().all(|c| matches!(c, b'0'..=b'9' | b'a'..=b'f')));
        prop_assert_eq!(hex.parse::<crate::Digest>().unwrap(), Md5::digest_message(&text).unwrap());
    }
}
