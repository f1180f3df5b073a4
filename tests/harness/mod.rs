//! Tests of the harness itself: fixture resets and cached tokens.

mod reset;
mod token_cache;

use dockstore_test_utils::prelude::*;
