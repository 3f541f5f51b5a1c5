//! Data access for the annotations table.

use crate::cli::Args;
use crate::warn_if_setting_is_missing;
use env::{SUPABASE_ANON_KEY, SUPABASE_URL};
use memory::MemoryStore;
use std::sync::Arc;
use store::SharedAnnotationStore;
use supabase::SupabaseStore;

pub mod env;
pub mod errors;
pub mod memory;
pub mod models;
pub mod store;
pub mod supabase;

pub struct Backend {
    pub store: SharedAnnotationStore,
    pub persistent: bool,
}

pub fn init(args: &Args) -> Backend {
    warn_if_setting_is_missing!(args.supabase_url, SUPABASE_URL, "Annotations won't persist.");
    warn_if_setting_is_missing!(
        args.supabase_anon_key,
        SUPABASE_ANON_KEY,
        "Annotations won't persist."
    );
    let (Some(project_url), Some(anon_key)) = (&args.supabase_url, &args.supabase_anon_key) else {
        tracing::warn!("Keeping annotations in memory.");
        return in_memory();
    };
    match SupabaseStore::new(project_url, anon_key, &args.annotations_table) {
        Ok(store) => {
            tracing::info!(
                project_url = %project_url,
                table = %args.annotations_table,
                "Initialized the Supabase annotation store."
            );
            Backend {
                store: Arc::new(store),
                persistent: true,
            }
        }
        Err(err) => {
            tracing::error!(
                project_url = %project_url,
                table = %args.annotations_table,
                "Can't build the table URL ({err}), keeping annotations in memory."
            );
            in_memory()
        }
    }
}

fn in_memory() -> Backend {
    Backend {
        store: Arc::new(MemoryStore::default()),
        persistent: false,
    }
}
