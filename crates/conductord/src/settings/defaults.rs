use serde_json::{Map, Value, json};

/// Document written on first run when no settings file exists.
pub(super) fn builtin_document() -> Map<String, Value> {
    let document = json!({
        "listeningHost": "0.0.0.0",
        "listeningPort": 443,
        "listenerMaxConnections": 100,
        "listenerMaxConnectionsPerIP": -1,
        "listenerAcceptedOrigins": [],
        "serverFrequency": 25,
        "serverName": "conductor",
        "serverGamemode": "FFA",
        "chatEnabled": true,
        "chatFilteredPhrases": [],
        "chatCooldown": 1000,
        "worldMapX": 0,
        "worldMapY": 0,
        "worldMapW": 7071,
        "worldMapH": 7071,
        "worldMaxPlayers": 50,
        "worldPlayerBotsPerWorld": 0,
        "worldMinionsPerPlayer": 0
    });
    match document {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
