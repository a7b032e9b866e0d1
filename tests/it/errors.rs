// Copyright 2023 Datafuse Labs.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::io::Write;

use goldenfile::Mint;
use jsonparse::parse;

#[test]
fn test_parse_errors() {
    let mut mint = Mint::new("tests/it/testdata");
    let mut file = mint.new_goldenfile("errors.txt").unwrap();
    let cases = &[
        r#"{"#,
        r#"{{}"#,
        r#"{}{}"#,
        r#"{[]}"#,
        r#"{"key",}"#,
        r#"{"key": 123,}"#,
        r#"{ "key": [1, 2,]}"#,
        r#"[1, 2"#,
        r#""unterminated"#,
        r#"tru"#,
        r#"nulL"#,
        r#"-12x"#,
        r#"[1] x"#,
        r#"@"#,
    ];

    for case in cases {
        let err = parse(*case).unwrap_err();

        writeln!(file, "---------- Input ----------").unwrap();
        writeln!(file, "{case}").unwrap();
        writeln!(file, "---------- Output ---------").unwrap();
        writeln!(file, "{err}").unwrap();
        writeln!(file, "---------- Error ----------").unwrap();
        writeln!(file, "{err:?}").unwrap();
        writeln!(file, "\n").unwrap();
    }
}
