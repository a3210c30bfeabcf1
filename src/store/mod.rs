// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod error;
pub mod kv;
pub mod ledger;
pub mod profiles;

pub use error::StoreError;
pub use kv::KvStore;
pub use ledger::Ledger;
pub use profiles::Profiles;
