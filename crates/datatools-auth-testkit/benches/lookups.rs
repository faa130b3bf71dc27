//! Construction and query throughput for permission lookups.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use datatools_auth_core::{ClientId, Permission, PermissionType, SettingsBuilder};
use datatools_auth_perms::UserPermissions;

fn large_profile() -> serde_json::Value {
    let mut builder = SettingsBuilder::new("bench").organization("org-0", vec![]);
    for i in 0..200 {
        let feeds: Vec<String> = (0..10).map(|f| format!("feed-{i}-{f}")).collect();
        builder = builder.project(
            format!("project-{i}"),
            vec![
                Permission::for_feeds(PermissionType::EditGtfs, feeds.clone()),
                Permission::new(PermissionType::ViewFeed),
            ],
            feeds,
        );
    }
    let mut datatools = vec![SettingsBuilder::new("other").application_admin().build()];
    datatools.push(builder.build());
    serde_json::to_value(datatools).expect("settings encode")
}

fn bench_lookups(c: &mut Criterion) {
    let datatools = large_profile();
    let client = ClientId::new("bench");

    c.bench_function("build_from_value", |b| {
        b.iter(|| UserPermissions::from_value(Some(black_box(&datatools)), &client))
    });

    let perms = UserPermissions::from_value(Some(&datatools), &client).into_inner();
    c.bench_function("has_feed_permission", |b| {
        b.iter(|| {
            perms.has_feed_permission(
                None,
                black_box("project-150"),
                black_box("feed-150-9"),
                &PermissionType::EditGtfs,
            )
        })
    });
}

criterion_group!(benches, bench_lookups);
criterion_main!(benches);
