use super::Host;
use crate::Result;
use crate::functions::FunctionRegistry;
use clap::Parser;
use ohno::IntoAppError;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct FunctionsArgs {
    /// Print the listing as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn list_functions<H: Host>(host: &mut H, args: &FunctionsArgs) -> Result<()> {
    let registry = FunctionRegistry::builtin();

    if args.json {
        let defs: Vec<_> = registry.iter().collect();
        let json = serde_json::to_string_pretty(&defs).into_app_err("serializing function listing")?;
        let _ = writeln!(host.output(), "{json}");
        return Ok(());
    }

    let mut out = host.output();
    for def in registry.iter() {
        let _ = writeln!(out, "{}({})", def.name, def.parameters.join(", "));
        let _ = writeln!(out, "    {}", def.description);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;

    #[test]
    fn test_plain_listing() {
        let mut host = TestHost::new();
        list_functions(&mut host, &FunctionsArgs { json: false }).unwrap();

        let output = host.output_str();
        assert!(output.starts_with("has allowed changes(context, allowedKeys)\n"), "{output}");
        assert!(output.contains("is vp valid(vp)\n"));
    }

    #[test]
    fn test_json_listing() {
        let mut host = TestHost::new();
        list_functions(&mut host, &FunctionsArgs { json: true }).unwrap();

        let listing: serde_json::Value = serde_json::from_str(&host.output_str()).unwrap();
        assert_eq!(listing.as_array().map(Vec::len), Some(4));
        assert_eq!(listing[1]["name"], "is proof valid");
    }
}
