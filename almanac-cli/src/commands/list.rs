use almanac_core::{CategoryFilter, Intent};
use anyhow::Result;

use crate::app::App;
use crate::render::render_list;

/// The sidebar: search term and category filter over all appointments.
pub fn run(app: &mut App, search: String, category: &str) -> Result<()> {
    let filter: CategoryFilter = category.parse()?;

    app.dispatch_all(vec![
        Intent::OpenSidebar,
        Intent::SetSearchTerm(search),
        Intent::SetFilterCategory(filter),
    ])?;

    let view = app.state.view(crate::app::today());
    println!("{}", render_list(&view.sidebar));
    Ok(())
}
