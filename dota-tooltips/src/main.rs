use anyhow::Result;

mod gamedir;
mod tooltips;

fn main() -> Result<()> {
    tooltips::run()
}
