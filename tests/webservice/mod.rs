//! Tests of webservice flows that the CLI does not drive: OAuth logins, GitHub
//! registry listings and anonymous TRS access.

mod auth;
mod registry;
mod trs;

use dockstore::model::{api::DescriptorDto, user::TokenDto};
use dockstore_test_utils::{fixtures::google::GOOGLE_ACCESS_TOKEN, prelude::*};
use predicates::prelude::*;
use reqwest::StatusCode;
use serde_json::json;
