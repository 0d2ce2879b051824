use dragon_access::{TypedAccessor, Value};
use serde_json::json;

fn main() -> Result<(), dragon_access::Error> {
    let data = Value::from(json!({
        "app": { "name": "dragon-demo", "debug": "yes" },
        "servers": [
            { "host": "alpha.internal", "port": "8080" },
            { "host": "beta.internal" }
        ]
    }));
    let config = TypedAccessor::new("config", &data)?;

    let app = config.get_object("app")?;
    let name = app.get_string_or("name", "demo")?;
    let debug = app.get_boolean_or("debug", false)?;
    println!("App: {name} (debug={debug})");

    for server in config.get_object_array("servers")? {
        let host = server.get_string("host")?;
        let port = server.get_number_or("port", 80)?;
        println!("{}: {host}:{port}", server.label());
    }

    // Flat view over the whole process environment
    let env = TypedAccessor::from_env();
    let workers = env.get_number_or("APP_WORKERS", 4)?;
    println!("workers = {workers}");
    if let Some(home) = env.get_string_opt("HOME")? {
        println!("HOME = {home}");
    }

    Ok(())
}
