use anyhow::{bail, Context};
use camrole::enumeration::{DeviceEnumerator, StaticEnumerator};
use camrole::{CapabilityRegistry, ConfigSource, Resolver, DEFAULT_ENUMERATOR_SERVICE};
use std::env;

fn main() -> anyhow::Result<()> {
    camrole::init_logging();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: camrole-cli <list|validate|resolve|version> [args]");
        std::process::exit(1);
    }

    let command = &args[1];
    match command.as_str() {
        "list" => cmd_list(&args),
        "validate" => cmd_validate(&args),
        "resolve" => cmd_resolve(&args),
        "version" => cmd_version(&args),
        _ => {
            eprintln!("Unknown command: {}", command);
            std::process::exit(1);
        }
    }
}

fn cmd_version(args: &[String]) -> anyhow::Result<()> {
    let info = camrole::get_info();
    if args.contains(&"--json".to_string()) {
        println!("{}", serde_json::to_string(&info)?);
    } else {
        let native = if info.native_enumeration { "native" } else { "no native" };
        println!("{} {} ({} enumeration)", info.name, info.version, native);
    }
    Ok(())
}

fn load_registry(path: &str) -> anyhow::Result<CapabilityRegistry> {
    CapabilityRegistry::load(&ConfigSource::path(path))
        .with_context(|| format!("loading camera configuration {}", path))
}

fn cmd_list(args: &[String]) -> anyhow::Result<()> {
    if args.len() < 3 {
        eprintln!("Usage: camrole-cli list <config> [--json]");
        std::process::exit(1);
    }
    let registry = load_registry(&args[2])?;
    if args.contains(&"--json".to_string()) {
        println!("{}", serde_json::to_string(registry.entries())?);
    } else {
        for entry in registry.entries() {
            println!("{}: {}", entry.device_id, entry.functions.join(", "));
        }
    }
    Ok(())
}

fn cmd_validate(args: &[String]) -> anyhow::Result<()> {
    if args.len() < 3 {
        eprintln!("Usage: camrole-cli validate <config>");
        std::process::exit(1);
    }
    let registry = load_registry(&args[2])?;
    println!("OK: {} cameras configured", registry.len());
    Ok(())
}

fn cmd_resolve(args: &[String]) -> anyhow::Result<()> {
    // Parse args: resolve <config> <function> [--devices <a,b,...>] [--service <name>] [--all] [--json]
    let mut config = None;
    let mut function = None;
    let mut devices: Option<Vec<String>> = None;
    let mut service = DEFAULT_ENUMERATOR_SERVICE.to_string();
    let mut all = false;
    let mut json = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--devices" => {
                i += 1;
                let list = args.get(i).context("--devices needs a value")?;
                devices = Some(
                    list.split(',')
                        .map(str::trim)
                        .filter(|id| !id.is_empty())
                        .map(str::to_string)
                        .collect(),
                );
            }
            "--service" => {
                i += 1;
                service = args.get(i).context("--service needs a value")?.clone();
            }
            "--all" => all = true,
            "--json" => json = true,
            other => {
                if config.is_none() {
                    config = Some(other.to_string());
                } else if function.is_none() {
                    function = Some(other.to_string());
                } else {
                    bail!("unexpected argument: {}", other);
                }
            }
        }
        i += 1;
    }

    let config = config.context("config path required")?;
    let function = function.context("function required")?;
    let registry = load_registry(&config)?;
    let resolver = Resolver::new(&registry);

    let enumerator: std::sync::Arc<dyn DeviceEnumerator> = match devices {
        Some(ids) => std::sync::Arc::new(StaticEnumerator::new(ids)),
        None => camrole::platform::default_directory().get_service(&service)?,
    };

    if all {
        let candidates = resolver.candidates_from(enumerator.as_ref(), &function);
        if json {
            println!("{}", serde_json::to_string(&candidates)?);
        } else {
            for id in candidates {
                println!("{}", id);
            }
        }
        return Ok(());
    }

    let camera = resolver.resolve_from(enumerator.as_ref(), &function);
    if json {
        println!("{}", serde_json::to_string(&camera)?);
    } else {
        match camera {
            Some(id) => println!("{}", id),
            None => {
                eprintln!("No camera serves function {}", function);
                std::process::exit(2);
            }
        }
    }
    Ok(())
}
