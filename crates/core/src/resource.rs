// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Resource identity and the universal registry entity (spec.md §3).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Semantic type of a registry resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    // Tier 1 — lab resources
    Lab,
    LabVm,
    LabNetwork,
    // Tier 2 — virtualization
    Vm,
    Template,
    StoragePool,
    // Tier 3 — infrastructure
    Host,
    Switch,
    SwitchPort,
    Vlan,
    StorageSystem,
}

crate::simple_display! {
    ResourceType {
        Lab => "lab",
        LabVm => "lab_vm",
        LabNetwork => "lab_network",
        Vm => "vm",
        Template => "template",
        StoragePool => "storage_pool",
        Host => "host",
        Switch => "switch",
        SwitchPort => "switch_port",
        Vlan => "vlan",
        StorageSystem => "storage_system",
    }
}

impl std::str::FromStr for ResourceType {
    type Err = ResourceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "lab" => ResourceType::Lab,
            "lab_vm" => ResourceType::LabVm,
            "lab_network" => ResourceType::LabNetwork,
            "vm" => ResourceType::Vm,
            "template" => ResourceType::Template,
            "storage_pool" => ResourceType::StoragePool,
            "host" => ResourceType::Host,
            "switch" => ResourceType::Switch,
            "switch_port" => ResourceType::SwitchPort,
            "vlan" => ResourceType::Vlan,
            "storage_system" => ResourceType::StorageSystem,
            other => return Err(ResourceIdError::UnknownType(other.to_string())),
        })
    }
}

/// Current lifecycle state of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceState {
    #[default]
    Unknown,
    Creating,
    Running,
    Stopped,
    Paused,
    Error,
    Deleting,
    Deleted,
    Degraded,
    Healthy,
}

crate::simple_display! {
    ResourceState {
        Unknown => "unknown",
        Creating => "creating",
        Running => "running",
        Stopped => "stopped",
        Paused => "paused",
        Error => "error",
        Deleting => "deleting",
        Deleted => "deleted",
        Degraded => "degraded",
        Healthy => "healthy",
    }
}

/// Errors parsing or constructing a [`ResourceId`].
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ResourceIdError {
    #[error("resource id must have 3 or 4 colon-separated segments: {0:?}")]
    WrongSegmentCount(String),
    #[error("unknown resource type segment: {0:?}")]
    UnknownType(String),
    #[error("platform-local id must not contain a colon: {0:?}")]
    IdContainsColon(String),
}

/// Globally unique, stable-across-restarts resource identity.
///
/// Format (spec.md §6): `<platform>:<instance>:<type>:<platform_id>` (four
/// segments) when an instance tag is present, otherwise
/// `<platform>:<type>:<platform_id>` (three segments). Platform-local ids
/// must not contain colons.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    pub platform: String,
    pub instance: Option<String>,
    pub resource_type: ResourceType,
    pub platform_id: String,
}

impl ResourceId {
    pub fn new(
        platform: impl Into<String>,
        instance: Option<String>,
        resource_type: ResourceType,
        platform_id: impl Into<String>,
    ) -> Result<Self, ResourceIdError> {
        let platform_id = platform_id.into();
        if platform_id.contains(':') {
            return Err(ResourceIdError::IdContainsColon(platform_id));
        }
        Ok(Self { platform: platform.into(), instance, resource_type, platform_id })
    }

    pub fn parse(s: &str) -> Result<Self, ResourceIdError> {
        let segments: Vec<&str> = s.split(':').collect();
        match segments.as_slice() {
            [platform, ty, id] => Ok(Self {
                platform: platform.to_string(),
                instance: None,
                resource_type: ty.parse()?,
                platform_id: id.to_string(),
            }),
            [platform, instance, ty, id] => Ok(Self {
                platform: platform.to_string(),
                instance: Some(instance.to_string()),
                resource_type: ty.parse()?,
                platform_id: id.to_string(),
            }),
            _ => Err(ResourceIdError::WrongSegmentCount(s.to_string())),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.instance {
            Some(instance) => {
                write!(f, "{}:{}:{}:{}", self.platform, instance, self.resource_type, self.platform_id)
            }
            None => write!(f, "{}:{}:{}", self.platform, self.resource_type, self.platform_id),
        }
    }
}

impl Serialize for ResourceId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ResourceId::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Desired state a resource may be reconciled toward (spec.md §3 invariant d).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesiredState {
    Running,
    Stopped,
}

crate::simple_display! {
    DesiredState {
        Running => "running",
        Stopped => "stopped",
    }
}

/// The universal resource representation tracked by the Registry Store (C2).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    pub state: ResourceState,
    pub lab_id: Option<String>,
    #[serde(default)]
    pub config: HashMap<String, String>,
    pub desired_state: Option<DesiredState>,
    #[serde(default)]
    pub desired_config: HashMap<String, String>,
    /// Tier 1/2/3, controls update cadence (spec.md §3, §5).
    pub tier: u8,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub last_seen: chrono::DateTime<chrono::Utc>,
}

impl Resource {
    pub fn new(id: ResourceId, name: impl Into<String>, tier: u8, now: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            state: ResourceState::Unknown,
            lab_id: None,
            config: HashMap::new(),
            desired_state: None,
            desired_config: HashMap::new(),
            tier,
            created_at: now,
            updated_at: now,
            last_seen: now,
        }
    }

    pub fn platform(&self) -> &str {
        &self.id.platform
    }

    pub fn resource_type(&self) -> ResourceType {
        self.id.resource_type
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
