// Dependencies Tests
//
// Tests for module resolution, dependency discovery and entry-point
// ordering.

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use crate::dependencies::src::*;
    use crate::file_system::testing::MockFileSystem;
    use crate::file_system::AbsoluteFsPath;
    use crate::logging::NullLogger;
    use crate::packages::src::entry_point::get_entry_point_info;

    fn path(p: &str) -> AbsoluteFsPath {
        AbsoluteFsPath::new(p)
    }

    mod module_resolver_tests {
        use super::*;

        #[test]
        fn should_resolve_relative_specifiers_with_postfixes() {
            let fs = MockFileSystem::from_files(&[
                ("/dist/index.js", ""),
                ("/dist/sub/other.js", ""),
                ("/dist/folder/index.js", ""),
            ]);
            let resolver = ModuleResolver::new(&fs, None);
            assert_eq!(
                resolver.resolve_module_import("./sub/other", &path("/dist/index.js")),
                Some(ResolvedModule::Relative(path("/dist/sub/other.js")))
            );
            assert_eq!(
                resolver.resolve_module_import("./folder", &path("/dist/index.js")),
                Some(ResolvedModule::Relative(path("/dist/folder/index.js")))
            );
            assert_eq!(
                resolver.resolve_module_import("./missing", &path("/dist/index.js")),
                None
            );
        }

        #[test]
        fn should_resolve_bare_specifiers_to_entry_points() {
            let fs = MockFileSystem::from_files(&[
                ("/node_modules/lib-1/package.json", "{}"),
                ("/node_modules/lib-1/index.js", ""),
                ("/node_modules/lib-1/deep/file.js", ""),
                ("/node_modules/pkg/dist/main.js", ""),
                ("/node_modules/pkg/package.json", "{}"),
            ]);
            let resolver = ModuleResolver::new(&fs, None);
            let from = path("/node_modules/pkg/dist/main.js");
            assert_eq!(
                resolver.resolve_module_import("lib-1", &from),
                Some(ResolvedModule::External(path("/node_modules/lib-1")))
            );
            assert_eq!(
                resolver.resolve_module_import("lib-1/deep/file", &from),
                Some(ResolvedModule::DeepImport(path(
                    "/node_modules/lib-1/deep/file.js"
                )))
            );
            assert_eq!(resolver.resolve_module_import("absent", &from), None);
        }

        #[test]
        fn should_consult_path_mappings_before_bare_resolution() {
            let fs = MockFileSystem::from_files(&[
                ("/dist/index.js", ""),
                ("/dist/components/package.json", "{}"),
                ("/node_modules/components/package.json", "{}"),
            ]);
            let mut paths = IndexMap::new();
            paths.insert("@app/*".to_string(), vec!["*".to_string()]);
            let mappings = PathMappings {
                base_url: "/dist".to_string(),
                paths,
            };
            let resolver = ModuleResolver::new(&fs, Some(&mappings));
            assert_eq!(
                resolver.resolve_module_import("@app/components", &path("/dist/index.js")),
                Some(ResolvedModule::External(path("/dist/components")))
            );
        }
    }

    mod dependency_host_tests {
        use super::*;

        fn host_fixture() -> MockFileSystem {
            MockFileSystem::from_files(&[
                ("/node_modules/lib-1/package.json", "{}"),
                ("/node_modules/lib-1/index.js", ""),
                ("/node_modules/lib-1/sub/package.json", "{}"),
                ("/node_modules/lib-1/sub/index.js", ""),
                ("/node_modules/lib-2/package.json", "{}"),
                ("/node_modules/lib-2/index.js", ""),
                ("/node_modules/lib-2/deep/import.js", ""),
            ])
        }

        #[test]
        fn should_return_empty_sets_for_files_without_import_shapes() {
            let fs = host_fixture();
            fs.add_file("/dist/index.js", "var x = 1;\nfunction foo() {}\n");
            let host = EsmDependencyHost::new(&fs, ModuleResolver::new(&fs, None));
            let deps = host.find_dependencies(&path("/dist/index.js")).unwrap();
            assert!(deps.dependencies.is_empty());
            assert!(deps.missing.is_empty());
            assert!(deps.deep_imports.is_empty());
        }

        #[test]
        fn should_partition_dependencies_missing_and_deep_imports() {
            let fs = host_fixture();
            fs.add_file(
                "/dist/index.js",
                "import {A} from 'lib-1';\n\
                 import {B} from 'lib-1/sub';\n\
                 import {C} from 'lib-2/deep/import';\n\
                 import {D} from 'absent';\n\
                 export {E} from 'lib-2';\n",
            );
            let host = EsmDependencyHost::new(&fs, ModuleResolver::new(&fs, None));
            let deps = host.find_dependencies(&path("/dist/index.js")).unwrap();
            let dependencies: Vec<&str> =
                deps.dependencies.iter().map(|d| d.as_str()).collect();
            assert_eq!(
                dependencies,
                vec![
                    "/node_modules/lib-1",
                    "/node_modules/lib-1/sub",
                    "/node_modules/lib-2"
                ]
            );
            let missing: Vec<&str> = deps.missing.iter().map(|m| m.as_str()).collect();
            assert_eq!(missing, vec!["absent"]);
            let deep: Vec<&str> = deps.deep_imports.iter().map(|d| d.as_str()).collect();
            assert_eq!(deep, vec!["/node_modules/lib-2/deep/import.js"]);
        }

        #[test]
        fn should_recurse_into_internal_files_and_merge_results() {
            let fs = host_fixture();
            fs.add_file("/dist/index.js", "import {A} from './a';\nimport {B} from 'lib-1';\n");
            fs.add_file("/dist/a.js", "import {C} from 'lib-2';\nimport {D} from './b';\n");
            fs.add_file("/dist/b.js", "import {E} from 'lib-1';\n");
            let host = EsmDependencyHost::new(&fs, ModuleResolver::new(&fs, None));
            let deps = host.find_dependencies(&path("/dist/index.js")).unwrap();
            let dependencies: Vec<&str> =
                deps.dependencies.iter().map(|d| d.as_str()).collect();
            // lib-2 is discovered first, through ./a; lib-1 appears once.
            assert_eq!(
                dependencies,
                vec!["/node_modules/lib-2", "/node_modules/lib-1"]
            );
        }

        #[test]
        fn should_terminate_on_cyclic_internal_imports() {
            let fs = host_fixture();
            fs.add_file("/dist/index.js", "import {A} from './a';\n");
            fs.add_file("/dist/a.js", "import {B} from './b';\nimport {X} from 'lib-1';\n");
            fs.add_file("/dist/b.js", "import {A} from './a';\nimport {Y} from 'lib-2';\n");
            let host = EsmDependencyHost::new(&fs, ModuleResolver::new(&fs, None));
            let deps = host.find_dependencies(&path("/dist/index.js")).unwrap();
            let dependencies: Vec<&str> =
                deps.dependencies.iter().map(|d| d.as_str()).collect();
            // ./b is scanned before lib-1 is resolved, so lib-2 is found first.
            assert_eq!(
                dependencies,
                vec!["/node_modules/lib-2", "/node_modules/lib-1"]
            );
        }

        #[test]
        fn should_resolve_path_mapped_imports_into_the_dependency_set() {
            // The manifest declares `@app/*` -> `*` and `@lib/*/test` ->
            // `lib/*/test`, both against /dist.
            let fs = MockFileSystem::from_files(&[
                ("/dist/components/package.json", "{}"),
                ("/dist/shared/package.json", "{}"),
                ("/dist/lib/shared/test/package.json", "{}"),
                ("/node_modules/lib-1/package.json", "{}"),
                ("/node_modules/lib-1/index.js", ""),
            ]);
            fs.add_file(
                "/dist/index.js",
                "import {A} from '@app/components';\n\
                 import {B} from '@app/shared';\n\
                 import {C} from 'lib-1';\n\
                 import {D} from '@lib/shared/test';\n",
            );
            let mut paths = IndexMap::new();
            paths.insert("@app/*".to_string(), vec!["*".to_string()]);
            paths.insert("@lib/*/test".to_string(), vec!["lib/*/test".to_string()]);
            let mappings = PathMappings {
                base_url: "/dist".to_string(),
                paths,
            };
            let resolver = ModuleResolver::new(&fs, Some(&mappings));
            let host = EsmDependencyHost::new(&fs, resolver);
            let deps = host.find_dependencies(&path("/dist/index.js")).unwrap();
            let dependencies: Vec<&str> =
                deps.dependencies.iter().map(|d| d.as_str()).collect();
            assert_eq!(
                dependencies,
                vec![
                    "/dist/components",
                    "/dist/shared",
                    "/node_modules/lib-1",
                    "/dist/lib/shared/test"
                ]
            );
            assert!(deps.missing.is_empty());
        }

        #[test]
        fn should_detect_import_shapes_cheaply() {
            assert!(has_import_or_reexport_statements("import {A} from 'a';"));
            assert!(has_import_or_reexport_statements("export * from './b';"));
            assert!(!has_import_or_reexport_statements("var x = 1;"));
        }
    }

    mod dependency_resolver_tests {
        use super::*;
        use crate::dependencies::src::dependency_resolver::DependencyResolver;

        fn entry_point_files(name: &str, imports: &str) -> Vec<(String, String)> {
            let root = format!("/node_modules/{}", name);
            vec![
                (
                    format!("{}/package.json", root),
                    format!(
                        r#"{{"name": "{}", "typings": "./{}.d.ts", "fesm2015": "./fesm2015/{}.js"}}"#,
                        name, name, name
                    ),
                ),
                (format!("{}/{}.d.ts", root, name), String::new()),
                (format!("{}/fesm2015/{}.js", root, name), imports.to_string()),
            ]
        }

        fn build_fs(packages: &[(&str, &str)]) -> MockFileSystem {
            let fs = MockFileSystem::new();
            for (name, imports) in packages {
                for (path, contents) in entry_point_files(name, imports) {
                    fs.add_file(&path, &contents);
                }
            }
            fs
        }

        fn entry_points(fs: &MockFileSystem, names: &[&str]) -> Vec<crate::packages::src::entry_point::EntryPoint> {
            let logger = NullLogger::new();
            names
                .iter()
                .map(|name| {
                    let root = path(&format!("/node_modules/{}", name));
                    get_entry_point_info(fs, &logger, &root, &root).unwrap()
                })
                .collect()
        }

        #[test]
        fn should_order_dependencies_before_dependents() {
            let fs = build_fs(&[
                ("app", "import {B} from 'base';\nimport {M} from 'mid';\n"),
                ("mid", "import {B} from 'base';\n"),
                ("base", "var x = 1;\n"),
            ]);
            let logger = NullLogger::new();
            let host = EsmDependencyHost::new(&fs, ModuleResolver::new(&fs, None));
            let resolver = DependencyResolver::new(&fs, &logger, &host);
            let sorted = resolver
                .sort_entry_points_by_dependency(entry_points(&fs, &["app", "mid", "base"]))
                .unwrap();
            let names: Vec<&str> = sorted
                .entry_points
                .iter()
                .map(|e| e.name.as_str())
                .collect();
            let app = names.iter().position(|n| *n == "app").unwrap();
            let mid = names.iter().position(|n| *n == "mid").unwrap();
            let base = names.iter().position(|n| *n == "base").unwrap();
            assert!(base < mid);
            assert!(mid < app);
            assert!(sorted.invalid_entry_points.is_empty());
        }

        #[test]
        fn should_report_cycles_between_packages() {
            let fs = build_fs(&[
                ("a", "import {B} from 'b';\n"),
                ("b", "import {A} from 'a';\n"),
            ]);
            let logger = NullLogger::new();
            let host = EsmDependencyHost::new(&fs, ModuleResolver::new(&fs, None));
            let resolver = DependencyResolver::new(&fs, &logger, &host);
            let result = resolver.sort_entry_points_by_dependency(entry_points(&fs, &["a", "b"]));
            let error = result.err().unwrap();
            assert!(error.chain.contains("a"));
            assert!(error.chain.contains("b"));
        }

        #[test]
        fn should_invalidate_entry_points_with_missing_dependencies_transitively() {
            let fs = build_fs(&[
                ("broken", "import {X} from 'absent';\n"),
                ("victim", "import {B} from 'broken';\n"),
                ("ok", "var x = 1;\n"),
            ]);
            let logger = NullLogger::new();
            let host = EsmDependencyHost::new(&fs, ModuleResolver::new(&fs, None));
            let resolver = DependencyResolver::new(&fs, &logger, &host);
            let sorted = resolver
                .sort_entry_points_by_dependency(entry_points(&fs, &["broken", "victim", "ok"]))
                .unwrap();
            let names: Vec<&str> = sorted
                .entry_points
                .iter()
                .map(|e| e.name.as_str())
                .collect();
            assert_eq!(names, vec!["ok"]);
            assert_eq!(sorted.invalid_entry_points.len(), 2);
            let broken = sorted
                .invalid_entry_points
                .iter()
                .find(|i| i.entry_point.name == "broken")
                .unwrap();
            assert_eq!(broken.missing_dependencies, vec!["absent".to_string()]);
        }
    }
}
