mod argument_parsing;
mod toml_config;
