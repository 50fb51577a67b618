//! Tests for CLI argument parsing.

use std::path::PathBuf;

use super::cli::{Cli, Command};

mod parsing {
    use super::*;

    #[test]
    fn parse_list_defaults() {
        let cli = Cli::parse_from_iter(["netif-catalog", "list"]);

        assert!(matches!(
            cli.command,
            Command::List {
                up: false,
                all_families: false
            }
        ));
        assert!(!cli.json);
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parse_list_flags() {
        let cli = Cli::parse_from_iter(["netif-catalog", "list", "--up", "--all-families"]);

        assert!(matches!(
            cli.command,
            Command::List {
                up: true,
                all_families: true
            }
        ));
    }

    #[test]
    fn parse_addrs_requires_interface() {
        let cli = Cli::parse_from_iter(["netif-catalog", "addrs", "wlan0"]);
        assert!(matches!(cli.command, Command::Addrs { ref interface } if interface == "wlan0"));

        assert!(Cli::try_parse_from_iter(["netif-catalog", "addrs"]).is_err());
    }

    #[test]
    fn parse_bind_option_id() {
        let cli = Cli::parse_from_iter(["netif-catalog", "bind", "0.0.0.0"]);
        assert!(matches!(cli.command, Command::Bind { ref option_id } if option_id == "0.0.0.0"));
    }

    #[test]
    fn parse_prop_key() {
        let cli = Cli::parse_from_iter(["netif-catalog", "prop", "ro.product.model"]);
        assert!(matches!(cli.command, Command::Prop { ref key } if key == "ro.product.model"));
    }

    #[test]
    fn parse_copy_assets() {
        let cli = Cli::parse_from_iter(["netif-catalog", "copy-assets", "web", "/tmp/out", "--clean"]);

        match cli.command {
            Command::CopyAssets { src, out, clean } => {
                assert_eq!(src, PathBuf::from("web"));
                assert_eq!(out, PathBuf::from("/tmp/out"));
                assert!(clean);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parse_simple_subcommands() {
        let options = Cli::parse_from_iter(["netif-catalog", "options"]);
        assert!(matches!(options.command, Command::Options));

        let name = Cli::parse_from_iter(["netif-catalog", "device-name"]);
        assert!(matches!(name.command, Command::DeviceName));
    }

    #[test]
    fn up_flag_help_says_liveness_is_not_checked() {
        use clap::CommandFactory;

        let cmd = Cli::command();
        let list = cmd.find_subcommand("list").unwrap();
        let up = list.get_arguments().find(|a| a.get_id() == "up").unwrap();

        let help = up.get_help().unwrap().to_string();
        assert!(help.contains("liveness is not checked"), "help: {help}");
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from_iter(["netif-catalog"]).is_err());
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from_iter(["netif-catalog", "watch"]).is_err());
    }
}

mod global_options {
    use super::*;

    #[test]
    fn globals_accepted_after_subcommand() {
        let cli = Cli::parse_from_iter([
            "netif-catalog",
            "options",
            "--json",
            "-v",
            "--config",
            "custom.toml",
            "--exclude-loopback",
        ]);

        assert!(cli.json);
        assert!(cli.verbose);
        assert!(cli.exclude_loopback);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn exclude_interface_is_repeatable() {
        let cli = Cli::parse_from_iter([
            "netif-catalog",
            "--exclude-interface",
            "^docker",
            "--exclude-interface",
            "^veth",
            "list",
        ]);

        assert_eq!(cli.exclude_interfaces, ["^docker", "^veth"]);
    }

    #[test]
    fn property_program_override() {
        let cli = Cli::parse_from_iter([
            "netif-catalog",
            "prop",
            "x",
            "--property-program",
            "/usr/local/bin/getprop",
        ]);

        assert_eq!(
            cli.property_program,
            Some(PathBuf::from("/usr/local/bin/getprop"))
        );
    }
}

mod init_command {
    use super::*;

    #[test]
    fn init_default_output() {
        let cli = Cli::parse_from_iter(["netif-catalog", "init"]);

        match cli.command {
            Command::Init { output } => assert_eq!(output, PathBuf::from("netif-catalog.toml")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn init_custom_output() {
        let cli = Cli::parse_from_iter(["netif-catalog", "init", "-o", "custom.toml"]);

        match cli.command {
            Command::Init { output } => assert_eq!(output, PathBuf::from("custom.toml")),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
