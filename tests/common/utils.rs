use screen_locator::snapshot::tree::{BoundsDump, NodeDump, TreeSource};

pub fn fixture(name: &str) -> String {
    let base = std::env::current_dir().unwrap();
    let path = base.join("tests").join("fixtures").join(name);

    path.display().to_string()
}

/// A leaf with a complete bounding box.
pub fn node(id: &str, element_type: &str, bounds: (i32, i32, i32, i32)) -> NodeDump {
    let (left, top, width, height) = bounds;
    NodeDump {
        id: id.into(),
        element_type: Some(element_type.into()),
        bounds: Some(BoundsDump::complete(left, top, width, height)),
        ..Default::default()
    }
}

pub fn label(id: &str, text: &str, bounds: (i32, i32, i32, i32)) -> NodeDump {
    NodeDump {
        text: Some(text.into()),
        changeable: Some(false),
        ..node(id, "GuiLabel", bounds)
    }
}

/// An editable input of the given type, without text.
pub fn field(id: &str, element_type: &str, bounds: (i32, i32, i32, i32)) -> NodeDump {
    NodeDump {
        changeable: Some(true),
        ..node(id, element_type, bounds)
    }
}

pub fn text_field(id: &str, bounds: (i32, i32, i32, i32)) -> NodeDump {
    field(id, "GuiTextField", bounds)
}

pub fn button(id: &str, text: Option<&str>, tooltip: Option<&str>, bounds: (i32, i32, i32, i32)) -> NodeDump {
    NodeDump {
        text: text.map(Into::into),
        tooltip: tooltip.map(Into::into),
        ..node(id, "GuiButton", bounds)
    }
}

/// A container without a bounding box of its own.
pub fn container(id: &str, children: Vec<NodeDump>) -> NodeDump {
    NodeDump {
        id: id.into(),
        element_type: Some("GuiUserArea".into()),
        container: true,
        children,
        ..Default::default()
    }
}

/// One active window whose user area holds `children`.
pub fn window(id: &str, children: Vec<NodeDump>) -> TreeSource {
    let mut source = TreeSource::default();
    source.put_window(id, container(id, vec![container(&format!("{id}/usr"), children)]));
    source.set_active(Some(id));
    source
}
