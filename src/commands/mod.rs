// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod backups;
pub mod budgets;
pub mod categories;
pub mod currency;
pub mod doctor;
pub mod reports;
pub mod transactions;
