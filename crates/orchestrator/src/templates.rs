//! Auxiliary project files written on the first round

use deployer_core::TaskRequest;

pub const CONTENT_FILE: &str = "index.html";
pub const README_FILE: &str = "README.md";
pub const LICENSE_FILE: &str = "LICENSE";

pub fn readme(task: &TaskRequest) -> String {
    format!(
        r#"# Project: {task_id}

## Summary
This site was generated from a brief and published automatically.

Brief: "{brief}"

## How It Works
A task request is received over HTTP, a generative model writes `index.html`,
the result is pushed to this repository and served with GitHub Pages.
Later rounds revise the same page in place.

## License
This project uses the MIT License. See LICENSE for details.
"#,
        task_id = task.task,
        brief = task.brief
    )
}

pub fn mit_license(year: i32, holder: &str) -> String {
    format!(
        r#"MIT License

Copyright (c) {year} {holder}

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
"#
    )
}
