use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "rpc_providers": {
                "type": "object",
                "additionalProperties": { "$ref": "#/$defs/provider" }
            },
            "wallets": {
                "type": "object",
                "additionalProperties": { "$ref": "#/$defs/wallet" }
            },
            "contracts": {
                "type": "object",
                "properties": {
                    "test_erc20": { "$ref": "#/$defs/address" },
                    "uniswap_v2_router": { "$ref": "#/$defs/address" },
                    "weth_sepolia": { "$ref": "#/$defs/address" }
                }
            },
            "analysis": {
                "type": "object",
                "properties": {
                    "timeout_secs": { "type": "integer", "minimum": 1 },
                    "max_retries": { "type": "integer", "minimum": 0 },
                    "concurrency": { "type": "integer", "minimum": 1 },
                    "sample_address": { "$ref": "#/$defs/address" }
                }
            }
        },
        "$defs": {
            "address": {
                "type": "string",
                "pattern": "^0x[0-9a-fA-F]{40}$"
            },
            "provider": {
                "type": "object",
                "required": ["base_url"],
                "properties": {
                    "name": { "type": "string" },
                    "base_url": { "type": "string" },
                    "no_api_key": { "type": "boolean" },
                    "api_key": { "type": "string" },
                    "api_key_env": { "type": "string" }
                }
            },
            "wallet": {
                "type": "object",
                "required": ["user_agent"],
                "properties": {
                    "name": { "type": "string" },
                    "user_agent": { "type": "string" },
                    "origin": { "type": "string" },
                    "headers": {
                        "type": "object",
                        "additionalProperties": { "type": "string" }
                    }
                }
            }
        }
    })
});
