use crate::map_view::models::Viewport;

const HOME_TEMPLATE: &str = include_str!("../../assets/index.html");
const MAP_TEMPLATE: &str = include_str!("../../assets/map.html");

const BACKEND_WARNING_SLOT: &str = "<!-- BACKEND_WARNING -->";
const BACKEND_WARNING: &str = "<span class=\"warning\">\
    未配置 Supabase（SUPABASE_URL / SUPABASE_ANON_KEY），提交的信息只保存在内存中。</span>";
const VIEWPORT_SLOT: &str = "__VIEWPORT__";

pub fn home(persistent_backend: bool) -> String {
    let warning = if persistent_backend {
        ""
    } else {
        BACKEND_WARNING
    };
    HOME_TEMPLATE.replace(BACKEND_WARNING_SLOT, warning)
}

pub fn map(viewport: &Viewport) -> String {
    MAP_TEMPLATE.replace(VIEWPORT_SLOT, &serde_json::json!(viewport).to_string())
}
