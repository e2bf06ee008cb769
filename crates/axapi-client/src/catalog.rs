//! Accessor catalog
//!
//! Each entry maps one ACOS "show" command to exactly one AxAPI call: either
//! a structured resource path or, where the schema is broken or missing, a raw
//! CLI command sent through `clideploy`. Dispatch lives in
//! [`AxapiClient::call`](crate::AxapiClient::call).
//!
//! A target may contain one `{}` placeholder for a caller-supplied argument.

use crate::error::AxapiError;
use crate::models::Method;

/// Placeholder for the accessor argument
pub const PLACEHOLDER: &str = "{}";

/// One catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accessor {
    pub name: &'static str,
    pub method: Method,
    /// Resource path under `/axapi/v3/`, or the CLI command text
    pub target: &'static str,
    /// `target` is a CLI command for `clideploy`
    pub raw_command: bool,
    /// Equivalent CLI command, for humans
    pub show: &'static str,
}

const fn get(name: &'static str, path: &'static str, show: &'static str) -> Accessor {
    Accessor {
        name,
        method: Method::Get,
        target: path,
        raw_command: false,
        show,
    }
}

const fn cli(name: &'static str, command: &'static str) -> Accessor {
    Accessor {
        name,
        method: Method::Post,
        target: command,
        raw_command: true,
        show: command,
    }
}

/// Every known accessor
pub static CATALOG: &[Accessor] = &[
    // Configuration
    cli("startup_configs", "show startup-config all-partitions"),
    cli("running_configs", "show running with-default partition-config all"),
    cli("json_config", "show json-config"),
    // VRRP-A / aVCS
    get("vrrpa", "vrrp-a", "show vrrp-a"),
    get("vrrpa_stats", "vrrp-a/state/stats", "show vrrp-a statistics"),
    get("vcs_images", "vcs/images/oper", "show vcs images"),
    get("vcs_summary", "vcs/vcs-summary/oper", "show vcs summary"),
    // SLB objects
    get("slb_servers", "slb/server", "show slb server"),
    get("slb_service_groups", "slb/service-group", "show slb service-group"),
    get("slb_virtual_servers", "slb/virtual-server", "show slb virtual-server"),
    get("slb_server_stats", "slb/server/{}/stats", "show slb server <name>"),
    get("slb_service_group_stats", "slb/service-group/{}/stats", "show slb service-group <name>"),
    get("slb_virtual_server_stats", "slb/virtual-server/{}/stats", "show slb virtual-server <name>"),
    get("slb_server_oper", "slb/server/oper", "show slb server"),
    get("slb_service_group_oper", "slb/service-group/oper", "show slb service-group"),
    get("slb_virtual_server_oper", "slb/virtual-server/oper", "show slb virtual-server"),
    // System
    get("memory", "system/memory/oper", "show memory"),
    get("system_oper", "system/oper/", "show system"),
    get("hardware", "system/hardware/", "show hardware"),
    get("disk", "system/hardware/oper", "show disk"),
    get("slb_hw_compression", "slb/hw-compress/stats", "show slb hw-compression"),
    // Hardware appliances only
    get("environment", "system/environment", "show environment"),
    // Interfaces
    cli("interfaces_transceiver", "show interfaces transceiver ethernet {} details"),
    get("interface_ethernet", "interface/ethernet/stats", "show interfaces"),
    get("interface_ve", "interface/ve/stats", "show interfaces ve"),
    get("trunk", "interface/trunk/stats", "show trunk"),
    cli("lacp", "show lacp trunk detail"),
    get("lacp_counters", "network/lacp/stats", "show lacp counter"),
    get("vlans", "network/vlan", "show vlans"),
    get("vlan_stats", "network/vlan/stats", "show vlan counters"),
    // Resources. Not every ACOS release serves all of these.
    get("system_resources_usage", "system/resource-usage/oper", "show system resource-usage"),
    get("slb_resource_usage", "slb/resource-usage/oper", "show slb resource-usage"),
    get("resource_acct", "system/resource-accounting/oper", "show resource-accounting"),
    cli("resource_acct_system", "show resource-accounting resource-type system-resources"),
    // CPU and sessions
    get("icmp_stats", "system/icmp/stats", "show system icmp"),
    get("data_cpu", "system/data-cpu/stats", "show cpu"),
    get("control_cpu", "system/control-cpu/stats", "show cpu control-cpus"),
    get("cpu_load_sharing", "system/cpu-load-sharing/", "show cpu load-sharing"),
    cli("cpu_history", "show cpu history"),
    get("session", "system/session/stats", "show session"),
    // IP
    get("ip_route", "ip/fib/oper", "show ip route"),
    get("ip_stats", "ip/stats", "show ip stats"),
    get("ip_anomaly_drop", "ip/anomaly-drop/stats", "show ip anomaly-drop"),
    // SLB statistics
    get("slb_switch", "slb/switch/stats", "show slb switch"),
    get("slb_tcp_stack", "system/tcp/stats", "show slb tcp stack"),
    get("system_bandwidth_stats", "system/bandwidth/stats", "show system bandwidth"),
    cli("slb_ssl_error", "show slb ssl error"),
    cli("slb_ssl_stats", "show slb ssl stats"),
    get("slb_l4", "slb/l4/stats", "show slb l4"),
    get("slb_conn_rate_limit", "slb/common/conn-rate-limit", "show slb conn-rate-limit src-ip statistics"),
    get("performance", "slb/perf/stats", "show slb performance"),
    // Health monitoring
    get("health", "health/monitor", "show health monitor"),
    cli("health_monitor", "show health monitor"),
    cli("health_stat", "show health stat"),
    cli("health_down_reason", "show health down-reason {}"),
    // Logging and management
    get("logging_data", "syslog/oper", "show log"),
    get("logging", "logging", "show running logging"),
    get("management_services", "enable-management", "show running enable-management"),
    get("version", "version/oper", "show version"),
    get("bootimage", "bootimage/oper", "show bootimage"),
];

/// Find an accessor by name
pub fn lookup(name: &str) -> Option<&'static Accessor> {
    CATALOG.iter().find(|accessor| accessor.name == name)
}

/// Accessors that need no argument
pub fn parameterless() -> impl Iterator<Item = &'static Accessor> {
    CATALOG.iter().filter(|accessor| !accessor.takes_argument())
}

impl Accessor {
    pub fn takes_argument(&self) -> bool {
        self.target.contains(PLACEHOLDER)
    }

    /// Fill the placeholder and return the path or command to send.
    ///
    /// Path arguments are percent-encoded, CLI arguments are used verbatim.
    pub fn render(&self, argument: Option<&str>) -> Result<String, AxapiError> {
        match (self.takes_argument(), argument) {
            (false, None) => Ok(self.target.to_string()),
            (true, Some(argument)) if self.raw_command => {
                Ok(self.target.replacen(PLACEHOLDER, argument, 1))
            }
            (true, Some(argument)) => Ok(self
                .target
                .replacen(PLACEHOLDER, &urlencoding::encode(argument), 1)),
            (true, None) => Err(AxapiError::InvalidRequest(format!(
                "accessor {} requires an argument",
                self.name
            ))),
            (false, Some(_)) => Err(AxapiError::InvalidRequest(format!(
                "accessor {} takes no argument",
                self.name
            ))),
        }
    }
}
