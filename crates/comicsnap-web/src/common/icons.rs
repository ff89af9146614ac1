use dominator::{svg, Dom};

fn outline(class: &str, d: &str) -> Dom {
    svg!("svg", {
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr("fill", "none")
        .attr("viewBox", "0 0 24 24")
        .attr("stroke", "currentColor")
        .class(class)
        .children(&mut [
            svg!("path", {
                .attr("stroke-linecap", "round")
                .attr("stroke-linejoin", "round")
                .attr("stroke-width", "2")
                .attr("d", d)
            })
        ])
    })
}

pub fn search() -> Dom {
    outline("icon", "M21 21l-6-6m2-5a7 7 0 11-14 0 7 7 0 0114 0z")
}

pub fn user() -> Dom {
    outline("icon", "M16 7a4 4 0 11-8 0 4 4 0 018 0zM12 14a7 7 0 00-7 7h14a7 7 0 00-7-7z")
}

pub fn logout() -> Dom {
    outline("icon", "M17 16l4-4m0 0l-4-4m4 4H7m6 4v1a3 3 0 01-3 3H6a3 3 0 01-3-3V7a3 3 0 013-3h4a3 3 0 013 3v1")
}

pub fn close() -> Dom {
    outline("icon", "M6 18L18 6M6 6l12 12")
}
