// Packages Tests
//
// Tests for entry-point description, build markers, discovery and the
// transformer, plus an end-to-end pass through main_ngcc.

#[cfg(test)]
mod tests {
    use crate::analysis::src::decoration_analyzer::DecorationAnalyzer;
    use crate::file_system::testing::MockFileSystem;
    use crate::file_system::{AbsoluteFsPath, FileSystem};
    use crate::incremental::src::api::FileSnapshot;
    use crate::incremental::src::state::IncrementalState;
    use crate::logging::NullLogger;
    use crate::main_ngcc::{main_ngcc, NgccOptions};
    use crate::packages::src::*;

    fn path(p: &str) -> AbsoluteFsPath {
        AbsoluteFsPath::new(p)
    }

    const DECORATED_BUNDLE: &str = "import { Directive } from '@angular/core';\n\
         class MyDirective {\n}\n\
         MyDirective.decorators = [\n\
         \x20   { type: Directive }\n\
         ];\n\
         export { MyDirective };\n";

    fn angular_package(fs: &MockFileSystem, name: &str, dir: &str, bundle: &str) {
        fs.add_file(
            &format!("{}/package.json", dir),
            &format!(
                r#"{{"name": "{}", "typings": "./index.d.ts", "fesm2015": "./fesm2015/index.js"}}"#,
                name
            ),
        );
        fs.add_file(
            &format!("{}/index.d.ts", dir),
            "export declare class MyDirective {}\n",
        );
        fs.add_file(&format!("{}/index.metadata.json", dir), "{}");
        fs.add_file(&format!("{}/fesm2015/index.js", dir), bundle);
    }

    mod entry_point_tests {
        use super::*;

        #[test]
        fn should_describe_an_entry_point_from_its_manifest() {
            let fs = MockFileSystem::new();
            angular_package(&fs, "test-pkg", "/node_modules/test-pkg", "var x = 1;\n");
            let logger = NullLogger::new();
            let root = path("/node_modules/test-pkg");
            let entry_point = get_entry_point_info(&fs, &logger, &root, &root).unwrap();
            assert_eq!(entry_point.name, "test-pkg");
            assert_eq!(
                entry_point.typings,
                path("/node_modules/test-pkg/index.d.ts")
            );
            assert!(entry_point.compiled_by_angular);
            assert_eq!(
                entry_point.format_path("fesm2015"),
                Some(path("/node_modules/test-pkg/fesm2015/index.js"))
            );
        }

        #[test]
        fn should_reject_directories_without_typings() {
            let fs = MockFileSystem::from_files(&[(
                "/node_modules/plain/package.json",
                r#"{"name": "plain", "main": "./index.js"}"#,
            )]);
            let logger = NullLogger::new();
            let root = path("/node_modules/plain");
            assert!(get_entry_point_info(&fs, &logger, &root, &root).is_none());
        }

        #[test]
        fn should_map_properties_to_formats() {
            let fs = MockFileSystem::new();
            angular_package(&fs, "test-pkg", "/node_modules/test-pkg", "var x = 1;\n");
            let logger = NullLogger::new();
            let root = path("/node_modules/test-pkg");
            let entry_point = get_entry_point_info(&fs, &logger, &root, &root).unwrap();
            assert_eq!(
                get_entry_point_format(&fs, &entry_point, "fesm2015"),
                Some(EntryPointFormat::Esm2015)
            );
            assert_eq!(
                get_entry_point_format(&fs, &entry_point, "browser"),
                None
            );
        }

        #[test]
        fn should_sniff_the_format_of_main_bundles() {
            let fs = MockFileSystem::new();
            let logger = NullLogger::new();
            fs.add_file(
                "/node_modules/pkg/package.json",
                r#"{"name": "pkg", "typings": "./index.d.ts", "main": "./bundles/pkg.js"}"#,
            );
            fs.add_file("/node_modules/pkg/index.d.ts", "");
            fs.add_file(
                "/node_modules/pkg/bundles/pkg.js",
                "(function (global, factory) {\n\
                 typeof exports === 'object' && typeof module !== 'undefined' ? factory(exports) :\n\
                 typeof define === 'function' && define.amd ? define(['exports'], factory) :\n\
                 (factory((global.pkg = {})));\n\
                 }(this, (function (exports) {})));\n",
            );
            let root = path("/node_modules/pkg");
            let entry_point = get_entry_point_info(&fs, &logger, &root, &root).unwrap();
            assert_eq!(
                get_entry_point_format(&fs, &entry_point, "main"),
                Some(EntryPointFormat::Umd)
            );

            fs.add_file(
                "/node_modules/pkg/bundles/pkg.js",
                "var core = require('@angular/core');\nexports.x = 1;\n",
            );
            assert_eq!(
                get_entry_point_format(&fs, &entry_point, "main"),
                Some(EntryPointFormat::CommonJs)
            );
        }
    }

    mod build_marker_tests {
        use super::*;

        #[test]
        fn should_record_and_report_processed_properties() {
            let fs = MockFileSystem::new();
            angular_package(&fs, "test-pkg", "/node_modules/test-pkg", "var x = 1;\n");
            let logger = NullLogger::new();
            let root = path("/node_modules/test-pkg");
            let mut entry_point = get_entry_point_info(&fs, &logger, &root, &root).unwrap();
            assert!(!has_been_processed(&entry_point.package_json, "fesm2015"));

            mark_as_processed(&fs, &mut entry_point, &["fesm2015"]).unwrap();
            assert!(has_been_processed(&entry_point.package_json, "fesm2015"));
            assert!(!has_been_processed(&entry_point.package_json, "main"));

            // The manifest on disk carries the marker too.
            let reloaded = get_entry_point_info(&fs, &logger, &root, &root).unwrap();
            assert!(has_been_processed(&reloaded.package_json, "fesm2015"));
        }
    }

    mod entry_point_finder_tests {
        use super::*;

        #[test]
        fn should_find_primary_scoped_and_secondary_entry_points() {
            let fs = MockFileSystem::new();
            angular_package(&fs, "test-pkg", "/node_modules/test-pkg", "var x = 1;\n");
            angular_package(
                &fs,
                "test-pkg/sub",
                "/node_modules/test-pkg/sub",
                "var x = 1;\n",
            );
            angular_package(
                &fs,
                "@angular/core",
                "/node_modules/@angular/core",
                "var x = 1;\n",
            );
            // Nested installs are not entry points of this tree.
            angular_package(
                &fs,
                "nested",
                "/node_modules/test-pkg/node_modules/nested",
                "var x = 1;\n",
            );
            let logger = NullLogger::new();
            let finder = EntryPointFinder::new(&fs, &logger);
            let mut names: Vec<String> = finder
                .find_entry_points(&path("/node_modules"))
                .into_iter()
                .map(|entry_point| entry_point.name)
                .collect();
            names.sort();
            assert_eq!(
                names,
                vec![
                    "@angular/core".to_string(),
                    "test-pkg".to_string(),
                    "test-pkg/sub".to_string()
                ]
            );
        }
    }

    mod transformer_tests {
        use super::*;

        #[test]
        fn should_rewrite_a_bundle_and_emit_its_map() {
            let fs = MockFileSystem::new();
            angular_package(&fs, "test-pkg", "/node_modules/test-pkg", DECORATED_BUNDLE);
            let logger = NullLogger::new();
            let root = path("/node_modules/test-pkg");
            let entry_point = get_entry_point_info(&fs, &logger, &root, &root).unwrap();
            let transformer = Transformer::new(&fs, &logger);
            let provider = DecorationAnalyzer::new();
            let files = transformer
                .transform(&entry_point, "fesm2015", &provider, None)
                .unwrap();
            assert_eq!(files.len(), 2);
            assert!(!files[0].contents.contains("MyDirective.decorators"));
            assert!(files[0].contents.contains("sourceMappingURL=index.js.map"));
            assert!(files[1].path.ends_with("index.js.map"));
        }

        #[test]
        fn should_skip_files_proven_unchanged_by_the_incremental_state() {
            let fs = MockFileSystem::new();
            angular_package(&fs, "test-pkg", "/node_modules/test-pkg", DECORATED_BUNDLE);
            let logger = NullLogger::new();
            let root = path("/node_modules/test-pkg");
            let entry_point = get_entry_point_info(&fs, &logger, &root, &root).unwrap();

            let bundle = path("/node_modules/test-pkg/fesm2015/index.js");
            let snapshot = FileSnapshot::capture(&fs, &[bundle.clone()]);
            let state =
                IncrementalState::reconcile(&IncrementalState::fresh(), &snapshot, &snapshot);
            assert!(state.safe_to_skip(&bundle));

            let transformer = Transformer::new(&fs, &logger);
            let provider = DecorationAnalyzer::new();
            let files = transformer
                .transform(&entry_point, "fesm2015", &provider, Some(&state))
                .unwrap();
            assert!(files.is_empty());
        }
    }

    mod main_ngcc_tests {
        use super::*;

        #[test]
        fn should_process_packages_in_dependency_order_and_mark_them() {
            let fs = MockFileSystem::new();
            angular_package(
                &fs,
                "@angular/core",
                "/node_modules/@angular/core",
                "var x = 1;\n",
            );
            angular_package(&fs, "test-pkg", "/node_modules/test-pkg", DECORATED_BUNDLE);
            let logger = NullLogger::new();
            let provider = DecorationAnalyzer::new();
            let options = NgccOptions::new(path("/node_modules"));

            main_ngcc(&fs, &logger, &provider, &options, None).unwrap();

            let bundle = fs
                .read_file(&path("/node_modules/test-pkg/fesm2015/index.js"))
                .unwrap();
            assert!(!bundle.contains("MyDirective.decorators"));
            assert!(fs.is_file(&path("/node_modules/test-pkg/fesm2015/index.js.map")));

            let manifest = fs
                .read_file(&path("/node_modules/test-pkg/package.json"))
                .unwrap();
            assert!(manifest.contains("__processed_by_ivy_ngcc__"));
            assert!(manifest.contains("fesm2015"));
        }

        #[test]
        fn should_not_reprocess_marked_entry_points() {
            let fs = MockFileSystem::new();
            angular_package(
                &fs,
                "@angular/core",
                "/node_modules/@angular/core",
                "var x = 1;\n",
            );
            angular_package(&fs, "test-pkg", "/node_modules/test-pkg", DECORATED_BUNDLE);
            let logger = NullLogger::new();
            let provider = DecorationAnalyzer::new();
            let options = NgccOptions::new(path("/node_modules"));

            main_ngcc(&fs, &logger, &provider, &options, None).unwrap();
            let first = fs
                .read_file(&path("/node_modules/test-pkg/fesm2015/index.js"))
                .unwrap();
            main_ngcc(&fs, &logger, &provider, &options, None).unwrap();
            let second = fs
                .read_file(&path("/node_modules/test-pkg/fesm2015/index.js"))
                .unwrap();
            assert_eq!(first, second);
        }
    }
}
