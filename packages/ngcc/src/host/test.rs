// Reflection Host Tests
//
// Tests for class, decorator and wrapper-shape detection.

#[cfg(test)]
mod tests {
    use crate::host::src::api::*;
    use crate::host::src::reflection::analyze_source;

    mod esm_analysis_tests {
        use super::*;

        #[test]
        fn should_find_es2015_classes_and_their_decorators() {
            let source = "import { Directive } from '@angular/core';\n\
                          export class MyDirective {\n}\n\
                          MyDirective.decorators = [\n\
                          \x20   { type: Directive, args: [{ selector: '[my]' }] }\n\
                          ];\n";
            let analysis = analyze_source(source);
            assert_eq!(analysis.classes.len(), 1);
            let class = &analysis.classes[0];
            assert_eq!(class.name, "MyDirective");
            assert!(class.iife_return_span.is_none());
            let decorators = class.decorators.as_ref().unwrap();
            assert_eq!(decorators.elements.len(), 1);
            assert_eq!(decorators.elements[0].name, "Directive");
        }

        #[test]
        fn should_record_the_last_import_end() {
            let source = "import {A} from 'a';\nimport {B} from 'b';\nvar x = 1;\n";
            let analysis = analyze_source(source);
            let end = analysis.last_import_end.unwrap() as usize;
            assert_eq!(&source[..end], "import {A} from 'a';\nimport {B} from 'b';");
        }

        #[test]
        fn should_find_es5_iife_classes_with_inner_decorators() {
            let source = "import { Injectable } from '@angular/core';\n\
                          var MyService = (function () {\n\
                          \x20   function MyService() {\n    }\n\
                          \x20   MyService.decorators = [\n\
                          \x20       { type: Injectable }\n\
                          \x20   ];\n\
                          \x20   return MyService;\n\
                          }());\n";
            let analysis = analyze_source(source);
            assert_eq!(analysis.classes.len(), 1);
            let class = &analysis.classes[0];
            assert_eq!(class.name, "MyService");
            let return_span = class.iife_return_span.unwrap();
            assert_eq!(
                &source[return_span.start as usize..return_span.end as usize],
                "return MyService;"
            );
            let decorators = class.decorators.as_ref().unwrap();
            assert_eq!(decorators.elements[0].name, "Injectable");
        }

        #[test]
        fn should_find_switchable_declarations() {
            let source =
                "var compileNgModuleFactory = compileNgModuleFactory__PRE_R3__;\nvar x = 1;\n";
            let analysis = analyze_source(source);
            assert_eq!(analysis.switchable_declarations.len(), 1);
            let declaration = &analysis.switchable_declarations[0];
            assert_eq!(declaration.name, "compileNgModuleFactory");
            assert_eq!(
                declaration.initializer_text,
                "compileNgModuleFactory__PRE_R3__"
            );
        }

        #[test]
        fn should_record_the_last_require_end() {
            let source = "var core = require('@angular/core');\n\
                          var common = require('@angular/common');\n\
                          var x = 1;\n";
            let analysis = analyze_source(source);
            let end = analysis.last_require_end.unwrap() as usize;
            assert!(source[..end].ends_with("require('@angular/common');"));
        }
    }

    mod umd_wrapper_tests {
        use super::*;

        const UMD_SOURCE: &str = "(function (global, factory) {\n\
            typeof exports === 'object' && typeof module !== 'undefined' ? factory(exports, require('@angular/core')) :\n\
            typeof define === 'function' && define.amd ? define(['exports', '@angular/core'], factory) :\n\
            (factory((global.lib = {}), global.ng.core));\n\
            }(this, (function (exports, core) { 'use strict';\n\
            var A = 1;\n\
            })));\n";

        #[test]
        fn should_detect_all_three_branches() {
            let analysis = analyze_source(UMD_SOURCE);
            let wrapper = analysis.umd.as_ref().unwrap();
            assert!(wrapper.commonjs.is_some());
            assert!(wrapper.amd.is_some());
            assert!(wrapper.global.is_some());
            assert!(wrapper.factory_has_params);
            assert!(wrapper.commonjs.unwrap().has_args);
            assert!(wrapper.amd.unwrap().has_deps);
        }

        #[test]
        fn should_locate_branch_insertion_points() {
            let analysis = analyze_source(UMD_SOURCE);
            let wrapper = analysis.umd.as_ref().unwrap();
            let commonjs = wrapper.commonjs.unwrap();
            assert!(UMD_SOURCE[..commonjs.args_end as usize]
                .ends_with("require('@angular/core')"));
            let amd = wrapper.amd.unwrap();
            assert!(UMD_SOURCE[..amd.deps_array_end as usize].ends_with("'@angular/core'"));
            let global = wrapper.global.unwrap();
            assert!(UMD_SOURCE[..global.args_end as usize].ends_with("global.ng.core"));
        }

        #[test]
        fn should_analyze_the_factory_body_statements() {
            let source = "(function (global, factory) {\n\
                typeof exports === 'object' ? factory(exports) : factory((global.lib = {}));\n\
                }(this, (function (exports) {\n\
                var MyPipe = (function () {\n\
                \x20   function MyPipe() {\n    }\n\
                \x20   return MyPipe;\n\
                }());\n\
                })));\n";
            let analysis = analyze_source(source);
            assert!(analysis.umd.is_some());
            assert_eq!(analysis.classes.len(), 1);
            assert_eq!(analysis.classes[0].name, "MyPipe");
        }

        #[test]
        fn should_skip_missing_branches() {
            let source = "(function (global, factory) {\n\
                typeof exports === 'object' ? factory(exports) : factory((global.lib = {}));\n\
                }(this, (function (exports) {\n\
                })));\n";
            let analysis = analyze_source(source);
            let wrapper = analysis.umd.as_ref().unwrap();
            assert!(wrapper.commonjs.is_some());
            assert!(wrapper.amd.is_none());
            assert!(wrapper.global.is_some());
        }

        #[test]
        fn should_not_detect_a_wrapper_in_plain_files() {
            let analysis = analyze_source("var x = 1;\nmodule.exports = x;\n");
            assert!(analysis.umd.is_none());
        }
    }
}
