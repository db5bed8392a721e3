// 🆔 Identity Model - transaction identifiers
// Random 128-bit UUIDs drawn from the caller's generator so seeded runs replay exactly

use rand::Rng;
use uuid::{Builder, Uuid};

/// Fresh version-4 UUID built from 16 bytes of the given generator
pub fn new_transaction_uuid<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    let bytes: [u8; 16] = rng.gen();
    Builder::from_random_bytes(bytes).into_uuid()
}

/// Fresh transaction id in hyphenated form
pub fn new_transaction_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    new_transaction_uuid(rng).to_string()
}
