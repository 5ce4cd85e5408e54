use async_trait::async_trait;
use domain::{ElementId, ElementInfo, ElementState, Level, Role};
use neuron_ingest::neuron::{
    DcfInterfaces, IpOutputStreamRow, MacSettingsRow, SdiIoRow, VideoPathRow,
};
use neuron_normalize::{
    NormalizeError, SignalGroupCatalog, StorageCatalog, VsgBuilder, build_ip_flows,
    build_sdi_flows,
};
use neuron_storage::{InMemoryLevelStore, InMemoryVsgStore, VsgStore};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

struct FakeCatalog {
    levels: HashMap<i64, Uuid>,
    existing: HashMap<(String, Role), Uuid>,
}

impl FakeCatalog {
    fn with_levels() -> Self {
        Self {
            levels: HashMap::from([
                (Level::Video.number(), Uuid::new_v4()),
                (Level::Audio1.number(), Uuid::new_v4()),
            ]),
            existing: HashMap::new(),
        }
    }

    fn level(&self, level: Level) -> Uuid {
        self.levels[&level.number()]
    }
}

#[async_trait]
impl SignalGroupCatalog for FakeCatalog {
    async fn level_id(&self, level: Level) -> Result<Option<Uuid>, NormalizeError> {
        Ok(self.levels.get(&level.number()).copied())
    }

    async fn existing_vsg_id(
        &self,
        name: &str,
        role: Role,
    ) -> Result<Option<Uuid>, NormalizeError> {
        Ok(self.existing.get(&(name.to_string(), role)).copied())
    }
}

fn element() -> ElementInfo {
    ElementInfo {
        name: "Neuron".to_string(),
        id: ElementId::new(7, 42),
        protocol_name: "EVS Neuron NAP - CONVERT".to_string(),
        protocol_version: "Production".to_string(),
        state: ElementState::Active,
    }
}

fn path(key: &str, main_input: i32, backup_input: i32) -> VideoPathRow {
    VideoPathRow {
        key: key.to_string(),
        main_input,
        backup_input,
    }
}

fn sdi_rows(count: usize) -> Vec<SdiIoRow> {
    (1..=count)
        .map(|index| SdiIoRow {
            key: index.to_string(),
        })
        .collect()
}

fn stream(key: &str, selection: Option<&str>) -> IpOutputStreamRow {
    IpOutputStreamRow {
        key: key.to_string(),
        primary_destination_ip: "239.0.0.1".to_string(),
        primary_destination_port: 5000,
        secondary_destination_ip: "239.1.0.1".to_string(),
        secondary_destination_port: 5000,
        path_selection: selection.map(str::to_string),
    }
}

fn mac_rows() -> Vec<MacSettingsRow> {
    ["10.0.0.1", "10.0.1.1"]
        .iter()
        .enumerate()
        .map(|(index, ip)| MacSettingsRow {
            key: (index + 1).to_string(),
            ip_address: ip.to_string(),
        })
        .collect()
}

#[tokio::test]
async fn destination_uses_main_input_as_blue_video() {
    let catalog = Arc::new(FakeCatalog::with_levels());
    let video = catalog.level(Level::Video);
    let builder = VsgBuilder::new(catalog);
    let mut flows = build_sdi_flows(&element(), &sdi_rows(28), &[], &DcfInterfaces::default());

    let vsg = builder
        .build_destination(&element(), &path("A1", 531, 0), &mut flows)
        .await
        .expect("build")
        .expect("assigned");

    assert_eq!(vsg.name, "Neuron A1");
    assert_eq!(vsg.role, Role::Destination);
    let section = vsg.section(video).expect("video section");
    let blue = flows.get("3").expect("flow 3");
    assert_eq!(section.blue_flow_id, Some(blue.id));
    assert_eq!(section.red_flow_id, None);
    assert_eq!(blue.linked_signal_groups, vec![vsg.id]);
}

#[tokio::test]
async fn destination_uses_backup_input_as_red_video() {
    let catalog = Arc::new(FakeCatalog::with_levels());
    let video = catalog.level(Level::Video);
    let builder = VsgBuilder::new(catalog);
    let mut flows = build_sdi_flows(&element(), &sdi_rows(28), &[], &DcfInterfaces::default());

    let vsg = builder
        .build_destination(&element(), &path("A1", 531, 533), &mut flows)
        .await
        .expect("build")
        .expect("assigned");

    assert_eq!(vsg.linked_flows.len(), 1);
    let section = vsg.section(video).expect("video section");
    let blue = flows.get("3").expect("flow 3");
    let red = flows.get("5").expect("flow 5");
    assert_eq!(section.blue_flow_id, Some(blue.id));
    assert_eq!(section.red_flow_id, Some(red.id));
    assert_eq!(red.linked_signal_groups, vec![vsg.id]);
}

#[tokio::test]
async fn destination_with_only_backup_input_has_red_video() {
    let catalog = Arc::new(FakeCatalog::with_levels());
    let video = catalog.level(Level::Video);
    let builder = VsgBuilder::new(catalog);
    let mut flows = build_sdi_flows(&element(), &sdi_rows(4), &[], &DcfInterfaces::default());

    let vsg = builder
        .build_destination(&element(), &path("B1", 0, 530), &mut flows)
        .await
        .expect("build")
        .expect("backup input assigned");

    let section = vsg.section(video).expect("video section");
    let red = flows.get("2").expect("flow 2");
    assert_eq!(section.blue_flow_id, None);
    assert_eq!(section.red_flow_id, Some(red.id));
    assert!(flows.get("1").expect("flow 1").linked_signal_groups.is_empty());
}

#[tokio::test]
async fn destination_without_valid_inputs_is_dropped() {
    let builder = VsgBuilder::new(Arc::new(FakeCatalog::with_levels()));
    let mut flows = build_sdi_flows(&element(), &sdi_rows(4), &[], &DcfInterfaces::default());

    let vsg = builder
        .build_destination(&element(), &path("B1", 0, 600), &mut flows)
        .await
        .expect("build");
    assert!(vsg.is_none());

    let vsg = builder
        .build_destination(&element(), &path("B2", 540, 0), &mut flows)
        .await
        .expect("build");
    assert!(vsg.is_none(), "input beyond flow count");
}

#[tokio::test]
async fn destination_reports_a_gap_in_sdi_keys() {
    let builder = VsgBuilder::new(Arc::new(FakeCatalog::with_levels()));
    let rows = vec![
        SdiIoRow {
            key: "1".to_string(),
        },
        SdiIoRow {
            key: "5".to_string(),
        },
    ];
    let mut flows = build_sdi_flows(&element(), &rows, &[], &DcfInterfaces::default());

    let err = builder
        .build_destination(&element(), &path("A1", 530, 0), &mut flows)
        .await
        .expect_err("flow 2 is missing");
    assert!(matches!(err, NormalizeError::MissingFlow { ref key, .. } if key == "2"));
}

#[tokio::test]
async fn source_links_video_and_audio_on_both_colors() {
    let catalog = Arc::new(FakeCatalog::with_levels());
    let video = catalog.level(Level::Video);
    let audio = catalog.level(Level::Audio1);
    let builder = VsgBuilder::new(catalog);
    let mut flows = build_ip_flows(
        &element(),
        &mac_rows(),
        &[stream("1", Some("675"))],
        &[stream("1", None)],
        &DcfInterfaces::default(),
    )
    .expect("ip flows");

    let vsg = builder
        .build_source(&element(), &path("A1", 0, 0), &mut flows)
        .await
        .expect("source");

    assert_eq!(vsg.role, Role::Source);
    assert_eq!(vsg.linked_flows.len(), 2);
    let video_section = vsg.section(video).expect("video");
    let audio_section = vsg.section(audio).expect("audio");
    assert_eq!(
        video_section.blue_flow_id,
        flows.primary_video.get("A1").map(|flow| flow.id)
    );
    assert_eq!(
        video_section.red_flow_id,
        flows.secondary_video.get("A1").map(|flow| flow.id)
    );
    assert_eq!(
        audio_section.blue_flow_id,
        flows.primary_audio.get("A1").map(|flow| flow.id)
    );
    assert_eq!(
        audio_section.red_flow_id,
        flows.secondary_audio.get("A1").map(|flow| flow.id)
    );
    assert!(
        flows
            .into_flows()
            .iter()
            .all(|flow| flow.linked_signal_groups == vec![vsg.id])
    );
}

#[tokio::test]
async fn source_requires_flows_for_every_stream() {
    let builder = VsgBuilder::new(Arc::new(FakeCatalog::with_levels()));
    let mut flows = build_ip_flows(
        &element(),
        &mac_rows(),
        &[stream("1", Some("675"))],
        &[],
        &DcfInterfaces::default(),
    )
    .expect("ip flows");

    let err = builder
        .build_source(&element(), &path("A1", 0, 0), &mut flows)
        .await
        .expect_err("no audio");
    assert!(matches!(err, NormalizeError::MissingFlow { kind: "primary audio", .. }));
}

#[tokio::test]
async fn missing_level_skips_section_silently() {
    let catalog = FakeCatalog {
        levels: HashMap::new(),
        existing: HashMap::new(),
    };
    let builder = VsgBuilder::new(Arc::new(catalog));
    let mut flows = build_sdi_flows(&element(), &sdi_rows(2), &[], &DcfInterfaces::default());

    let vsg = builder
        .build_destination(&element(), &path("A1", 529, 530), &mut flows)
        .await
        .expect("build")
        .expect("still assigned");
    assert!(vsg.linked_flows.is_empty());
    assert_eq!(flows.get("1").expect("flow").linked_signal_groups, vec![vsg.id]);
}

#[tokio::test]
async fn storage_catalog_reuses_existing_vsg_ids() {
    let vsgs = Arc::new(InMemoryVsgStore::new());
    let existing = vsgs
        .upsert_vsg(domain::VirtualSignalGroup::new("Neuron A1", Role::Destination))
        .await
        .expect("seed");
    let catalog = StorageCatalog::new(Arc::new(InMemoryLevelStore::with_default_levels()), vsgs);
    let builder = VsgBuilder::new(Arc::new(catalog));
    let mut flows = build_sdi_flows(&element(), &sdi_rows(1), &[], &DcfInterfaces::default());

    let vsg = builder
        .build_destination(&element(), &path("A1", 529, 0), &mut flows)
        .await
        .expect("build")
        .expect("assigned");
    assert_eq!(vsg.id, existing.id);
    assert_eq!(vsg.linked_flows.len(), 1);
}
