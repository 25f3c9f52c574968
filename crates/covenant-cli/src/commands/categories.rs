//! Categories command implementation.

use crate::error::Result;
use crate::output::Formatter;
use covenant_domain::Category;

/// Execute the categories command.
pub fn execute_categories(formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_categories(Category::all())?);
    Ok(())
}
