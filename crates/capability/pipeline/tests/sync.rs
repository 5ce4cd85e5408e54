mod common;

use common::{A1, A2, Z9, add_neuron, element_info, pipeline};
use domain::{ElementId, ElementState, Resource, ResourceMode, Role};
use neuron_ingest::InMemoryDms;
use neuron_pipeline::{INPUT_VSGS_PROPERTY, OUTPUT_VSGS_PROPERTY, PATH_PROPERTY};
use neuron_storage::{FlowStore, InMemoryStores, ResourcePoolStore, ResourceStore, VsgStore};
use uuid::Uuid;

async fn pool_resources(stores: &InMemoryStores) -> Vec<Resource> {
    let pool = stores
        .pools
        .find_pool_by_name("Processors")
        .await
        .expect("pool")
        .expect("pool exists");
    let mut resources = stores
        .resources
        .list_resources_in_pool(pool.id)
        .await
        .expect("resources");
    resources.sort_by(|left, right| left.name.cmp(&right.name));
    resources
}

#[tokio::test]
async fn sync_publishes_flows_vsgs_and_resources() {
    let id = ElementId::new(1, 10);
    let mut dms = InMemoryDms::new();
    add_neuron(&mut dms, element_info(id, "Neuron 1", ElementState::Active), &[A1, A2], 2);
    let stores = InMemoryStores::default();

    let report = pipeline(dms, &stores).run().await.expect("run");

    assert!(report.is_clean());
    assert_eq!(report.processed.len(), 1);
    // 5 SDI + 2 通路 x (主/备视频 + 主/备音频)
    assert_eq!(report.flows_upserted, 13);
    assert_eq!(report.vsgs_upserted, 3);
    assert_eq!(report.resources_upserted, 2);
    assert_eq!(report.resources_deleted, 0);

    let destination = stores
        .vsgs
        .find_vsg("Neuron 1 A1", Role::Destination)
        .await
        .expect("find")
        .expect("A1 destination");
    assert!(
        stores
            .vsgs
            .find_vsg("Neuron 1 A2", Role::Destination)
            .await
            .expect("find")
            .is_none()
    );
    let source = stores
        .vsgs
        .find_vsg("Neuron 1 A2", Role::Source)
        .await
        .expect("find")
        .expect("A2 source");
    assert_eq!(source.linked_flows.len(), 2);

    let sdi = stores
        .flows
        .find_flow_by_name("Neuron 1 SDI 1")
        .await
        .expect("find")
        .expect("sdi flow");
    assert_eq!(sdi.interface.as_deref(), Some("10"));
    assert_eq!(sdi.linked_signal_groups, vec![destination.id]);
    let main_video = stores
        .flows
        .find_flow_by_name("Neuron 1 Main Video Stream A1")
        .await
        .expect("find")
        .expect("main video");
    assert_eq!(main_video.interface.as_deref(), Some("50"));
    let secondary_audio = stores
        .flows
        .find_flow_by_name("Neuron 1 Secondary Audio Stream 2")
        .await
        .expect("find")
        .expect("secondary audio");
    assert_eq!(secondary_audio.linked_signal_groups, vec![source.id]);

    let resources = pool_resources(&stores).await;
    assert_eq!(resources.len(), 2);
    let a1 = &resources[0];
    assert_eq!(a1.name, "Neuron 1 A1");
    assert_eq!(a1.element, Some(id));
    assert_eq!(a1.mode, ResourceMode::Available);
    assert_eq!(a1.property(PATH_PROPERTY), Some("A1"));
    assert_eq!(
        a1.property(INPUT_VSGS_PROPERTY),
        Some(destination.id.to_string().as_str())
    );
    let a2 = &resources[1];
    assert_eq!(a2.property(INPUT_VSGS_PROPERTY), Some(""));
    assert_eq!(
        a2.property(OUTPUT_VSGS_PROPERTY),
        Some(source.id.to_string().as_str())
    );
}

#[tokio::test]
async fn rerun_keeps_ids_and_creates_nothing_new() {
    let id = ElementId::new(1, 10);
    let build = || {
        let mut dms = InMemoryDms::new();
        add_neuron(&mut dms, element_info(id, "Neuron 1", ElementState::Active), &[A1, A2], 2);
        dms
    };
    let stores = InMemoryStores::default();

    pipeline(build(), &stores).run().await.expect("first run");
    let flows = stores.flows.list_flows().await.expect("flows");
    let vsgs = stores.vsgs.list_vsgs().await.expect("vsgs");
    let resources = pool_resources(&stores).await;

    let report = pipeline(build(), &stores).run().await.expect("second run");
    assert_eq!(report.resources_deleted, 0);

    let mut flows_after = stores.flows.list_flows().await.expect("flows");
    let mut flows_before = flows;
    flows_before.sort_by(|left, right| left.name.cmp(&right.name));
    flows_after.sort_by(|left, right| left.name.cmp(&right.name));
    assert_eq!(flows_before, flows_after);

    let vsgs_after = stores.vsgs.list_vsgs().await.expect("vsgs");
    assert_eq!(vsgs.len(), vsgs_after.len());
    for vsg in &vsgs {
        let again = vsgs_after
            .iter()
            .find(|candidate| candidate.name == vsg.name && candidate.role == vsg.role)
            .expect("same vsg");
        assert_eq!(again.id, vsg.id);
    }

    let resources_after = pool_resources(&stores).await;
    assert_eq!(resources, resources_after);
}

#[tokio::test]
async fn failing_element_does_not_stop_the_run() {
    let healthy = ElementId::new(1, 10);
    let broken = ElementId::new(1, 11);
    let mut dms = InMemoryDms::new();
    add_neuron(&mut dms, element_info(broken, "Neuron 2", ElementState::Active), &[A1], 1);
    add_neuron(&mut dms, element_info(healthy, "Neuron 1", ElementState::Active), &[A1], 2);
    let stores = InMemoryStores::default();

    let report = pipeline(dms, &stores).run().await.expect("run");

    assert_eq!(report.processed.len(), 1);
    assert_eq!(report.processed[0].element, healthy);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].element, broken);
    assert!(report.failed[0].error.contains("mac settings"));
    assert_eq!(pool_resources(&stores).await.len(), 1);
}

#[tokio::test]
async fn failing_path_writes_nothing_for_the_element() {
    let id = ElementId::new(1, 10);
    let mut dms = InMemoryDms::new();
    add_neuron(&mut dms, element_info(id, "Neuron 1", ElementState::Active), &[A1, Z9], 2);
    let stores = InMemoryStores::default();

    let report = pipeline(dms, &stores).run().await.expect("run");

    assert!(report.processed.is_empty());
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].error.contains("Z9"), "{}", report.failed[0].error);
    assert_eq!(report.flows_upserted, 0);
    assert_eq!(report.vsgs_upserted, 0);
    assert!(stores.flows.list_flows().await.expect("flows").is_empty());
    assert!(stores.vsgs.list_vsgs().await.expect("vsgs").is_empty());
    assert!(pool_resources(&stores).await.is_empty());
}

#[tokio::test]
async fn stored_vsgs_only_reference_stored_flows() {
    let mut dms = InMemoryDms::new();
    add_neuron(
        &mut dms,
        element_info(ElementId::new(1, 10), "Neuron 1", ElementState::Active),
        &[A1, A2],
        2,
    );
    let stores = InMemoryStores::default();
    pipeline(dms, &stores).run().await.expect("run");

    let flow_ids: Vec<Uuid> = stores
        .flows
        .list_flows()
        .await
        .expect("flows")
        .into_iter()
        .map(|flow| flow.id)
        .collect();
    for vsg in stores.vsgs.list_vsgs().await.expect("vsgs") {
        for section in &vsg.linked_flows {
            for flow_id in section.blue_flow_id.iter().chain(section.red_flow_id.iter()) {
                assert!(flow_ids.contains(flow_id), "{} links a missing flow", vsg.name);
            }
        }
    }
}

#[tokio::test]
async fn stale_resources_are_removed() {
    let first = ElementId::new(1, 10);
    let second = ElementId::new(1, 11);
    let stores = InMemoryStores::default();

    let mut dms = InMemoryDms::new();
    add_neuron(&mut dms, element_info(first, "Neuron 1", ElementState::Active), &[A1, A2], 2);
    add_neuron(&mut dms, element_info(second, "Neuron 2", ElementState::Active), &[A1], 2);
    pipeline(dms, &stores).run().await.expect("first run");
    assert_eq!(pool_resources(&stores).await.len(), 3);

    let mut dms = InMemoryDms::new();
    add_neuron(&mut dms, element_info(first, "Neuron 1", ElementState::Active), &[A1], 2);
    let report = pipeline(dms, &stores).run().await.expect("second run");

    assert_eq!(report.resources_deleted, 2);
    let names: Vec<_> = pool_resources(&stores)
        .await
        .into_iter()
        .map(|resource| resource.name)
        .collect();
    assert_eq!(names, vec!["Neuron 1 A1"]);
}

#[tokio::test]
async fn inactive_and_foreign_elements_are_left_alone() {
    let id = ElementId::new(1, 10);
    let stores = InMemoryStores::default();

    let mut dms = InMemoryDms::new();
    add_neuron(&mut dms, element_info(id, "Neuron 1", ElementState::Active), &[A1], 2);
    pipeline(dms, &stores).run().await.expect("first run");

    let mut dms = InMemoryDms::new();
    add_neuron(&mut dms, element_info(id, "Neuron 1", ElementState::Paused), &[A1], 2);
    let mut foreign = element_info(ElementId::new(2, 20), "Other", ElementState::Active);
    foreign.protocol_version = "1.0.0.1".to_string();
    add_neuron(&mut dms, foreign, &[A1], 2);
    let report = pipeline(dms, &stores).run().await.expect("second run");

    assert_eq!(report.skipped, vec![id]);
    assert!(report.processed.is_empty());
    assert!(report.failed.is_empty());
    assert_eq!(report.resources_deleted, 0);
    let resources = pool_resources(&stores).await;
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].element, Some(id));
    assert!(
        stores
            .flows
            .find_flow_by_name("Other SDI 1")
            .await
            .expect("find")
            .is_none()
    );
}

#[tokio::test]
async fn resources_of_live_foreign_elements_are_kept() {
    let neuron = ElementId::new(1, 10);
    let other = ElementId::new(9, 9);
    let build = || {
        let mut dms = InMemoryDms::new();
        add_neuron(&mut dms, element_info(neuron, "Neuron 1", ElementState::Active), &[A1], 2);
        let mut foreign = element_info(other, "Other processor", ElementState::Active);
        foreign.protocol_name = "Some Other Processor".to_string();
        add_neuron(&mut dms, foreign, &[A1], 2);
        dms
    };
    let stores = InMemoryStores::default();
    pipeline(build(), &stores).run().await.expect("first run");

    let pool = stores
        .pools
        .find_pool_by_name("Processors")
        .await
        .expect("pool")
        .expect("pool exists");
    stores
        .resources
        .upsert_resources(vec![Resource {
            id: Uuid::new_v4(),
            name: "Other processor 1".to_string(),
            element: Some(other),
            mode: ResourceMode::Available,
            max_concurrency: 1000,
            pool_ids: vec![pool.id],
            properties: Vec::new(),
            capabilities: Vec::new(),
        }])
        .await
        .expect("foreign resource");

    let report = pipeline(build(), &stores).run().await.expect("second run");

    assert_eq!(report.resources_deleted, 0);
    let names: Vec<_> = pool_resources(&stores)
        .await
        .into_iter()
        .map(|resource| resource.name)
        .collect();
    assert_eq!(names, vec!["Neuron 1 A1", "Other processor 1"]);
}

#[tokio::test]
async fn report_serializes_to_json() {
    let mut dms = InMemoryDms::new();
    add_neuron(
        &mut dms,
        element_info(ElementId::new(1, 10), "Neuron 1", ElementState::Active),
        &[A1],
        2,
    );
    let stores = InMemoryStores::default();
    let report = pipeline(dms, &stores).run().await.expect("run");

    let json = serde_json::to_value(&report).expect("json");
    assert_eq!(json["run_id"], report.run_id.as_str());
    assert_eq!(json["processed"][0]["name"], "Neuron 1");
    assert_eq!(json["processed"][0]["element"]["element_id"], 10);
    assert_eq!(json["resources_upserted"], 1);
}
