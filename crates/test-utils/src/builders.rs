#![allow(dead_code)]

use serde_json::json;

/// `docker ps -a --format=json` output for containers with these names.
pub fn ps_listing(names: &[&str]) -> String {
    let mut out = String::new();
    for name in names {
        let record = json!({
            "Command": "\"/docker-entrypoint.sh\"",
            "ID": "0123456789ab",
            "Image": format!("{name}:latest"),
            "Names": name,
            "State": "running",
        });
        out.push_str(&record.to_string());
        out.push('\n');
    }
    out
}

/// `docker inspect` output whose labels include the compose config file.
pub fn inspect_with_compose_file(compose_file: &str) -> String {
    json!([{
        "Id": "0123456789ab",
        "Config": {
            "Labels": {
                "com.docker.compose.project": "app",
                "com.docker.compose.project.config_files": compose_file,
            }
        }
    }])
    .to_string()
}

/// `docker inspect` output for a container not started by compose.
pub fn inspect_without_compose_labels() -> String {
    json!([{
        "Id": "0123456789ab",
        "Config": { "Labels": { "maintainer": "someone" } }
    }])
    .to_string()
}
