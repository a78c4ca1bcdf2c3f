use anyhow::Result;
use serde::Serialize;

use crate::output;

#[derive(Debug, Serialize)]
pub struct NewIdOut {
    pub id: String,
}

pub fn run() -> Result<()> {
    output::print(&NewIdOut { id: blogs_core::new_record_id() })
}
