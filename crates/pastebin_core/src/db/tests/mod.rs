//! Database integration tests.

use super::*;
use crate::test_support::{paste_at, setup_temp_db, t0, user_named};
use chrono::Duration;
use std::sync::{Arc, Barrier};
use std::thread;

mod queries;
