//! In-memory includes and links between options.
//!
//! Run with: cargo run --example includes

use std::error::Error;
use typed_ini::{from_resource, to_string, MapOpener, ResourceStack};

fn main() -> Result<(), Box<dyn Error>> {
    let opener = MapOpener::new()
        .with_resource("defaults.ini", "[defaults]\nmirrors = a.example.org, b.example.org")
        .with_resource("site.ini", "#include defaults.ini\n[site]\nname = north");

    let stack = ResourceStack::from_str(
        "#include \"site.ini\"\n\n[download]\nmirrors = local.example.org, ${defaults:mirrors}",
        opener,
    );
    let config = from_resource(stack)?;
    println!("{}", to_string(&config)?);

    // A resource that includes itself is reported instead of looping
    let looping = MapOpener::new().with_resource("loop.ini", "[l]\n#include loop.ini");
    match from_resource(ResourceStack::open("loop.ini", looping)?) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("{}", e),
    }

    Ok(())
}
