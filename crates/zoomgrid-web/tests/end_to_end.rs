#![forbid(unsafe_code)]

//! Pointer-driven sessions against the in-memory web host.

use core::time::Duration;

use pretty_assertions::assert_eq;
use zoomgrid_core::{CellId, GridEvent, GridShape, HostDocument, Size, ZoomGridConfig};
use zoomgrid_extras::{ContainerFade, Transparency, create_for_gallery};
use zoomgrid_web::{GridProgram, WebHost};

fn sizes(prog: &GridProgram, cells: &[zoomgrid_core::ElementId]) -> Vec<Size> {
    cells.iter().map(|el| prog.host().offset_size(*el)).collect()
}

#[test]
fn hover_zoom_and_leave() {
    let (host, container, cells) = WebHost::with_grid(9, 300, 300);
    let config = ZoomGridConfig::default().folded_size(20, 20);
    let mut prog = GridProgram::new(host, container, &config).unwrap();
    assert_eq!(prog.grid().state().shape(), GridShape { columns: 3, rows: 3 });
    assert_eq!(sizes(&prog, &cells), vec![Size::new(100, 100); 9]);

    prog.push_event(GridEvent::CellEnter(cells[4]));
    prog.run_until_idle(64);
    assert_eq!(prog.host().offset_size(cells[4]), Size::new(260, 260));
    assert_eq!(prog.host().offset_size(cells[0]), Size::new(20, 20));

    // Moving onto another cell inside the container is not a leave.
    prog.push_event(GridEvent::ContainerLeave {
        related: Some(cells[5]),
    });
    prog.step();
    assert_eq!(prog.grid().state().focused(), Some(CellId(4)));

    let body = prog.host().document.body();
    prog.push_event(GridEvent::ContainerLeave {
        related: Some(body),
    });
    prog.run_until_idle(64);
    assert_eq!(prog.grid().state().focused(), None);
    assert_eq!(sizes(&prog, &cells), vec![Size::new(100, 100); 9]);
}

#[test]
fn retarget_mid_flight_cancels_once() {
    let (host, container, cells) = WebHost::with_grid(9, 300, 300);
    let mut prog = GridProgram::new(host, container, &ZoomGridConfig::default()).unwrap();

    prog.push_event(GridEvent::CellEnter(cells[0]));
    prog.step();
    prog.advance_time(prog.grid().state().timeout());
    assert_eq!(prog.step().timers_fired, 1);

    prog.push_event(GridEvent::CellEnter(cells[8]));
    prog.step();
    assert_eq!(prog.host().timers.stats().cancelled, 1);
    assert_eq!(prog.host().timers.len(), 1);

    prog.run_until_idle(64);
    assert_eq!(prog.host().timers.stats().cancelled, 1);
    assert!(prog.host().timers.is_empty());
    assert_eq!(prog.grid().state().focused(), Some(CellId(8)));
}

#[test]
fn box_extra_is_compensated() {
    let (mut host, container, cells) = WebHost::with_grid(4, 200, 200);
    for el in &cells {
        host.document.set_box_extra(*el, Size::new(6, 4));
    }
    let config = ZoomGridConfig::default()
        .padding_margin_border(6, 4)
        .folded_size(20, 20);
    let mut prog = GridProgram::new(host, container, &config).unwrap();
    assert_eq!(sizes(&prog, &cells), vec![Size::new(100, 100); 4]);
    assert_eq!(prog.host().document.style(cells[0]).width, 94);

    prog.push_event(GridEvent::CellEnter(cells[0]));
    prog.run_until_idle(64);
    assert_eq!(prog.host().offset_size(cells[0]), Size::new(180, 180));
    assert_eq!(prog.host().offset_size(cells[3]), Size::new(20, 20));
}

#[test]
fn click_gallery() {
    let mut host = WebHost::new();
    let body = host.document.body();
    let container = host.document.append(body, "DIV");
    host.document.resize(container, 400, 300);
    for n in 0..4 {
        let link = host.document.append(container, "A");
        host.document
            .set_attribute(link, "href", &format!("photos/{n}.png"));
    }

    let config = ZoomGridConfig::default()
        .zoom_on_click(true)
        .folded_size(40, 30);
    let grid = create_for_gallery(&mut host, container, &config).unwrap();
    grid.size_container_to_fit_around(&mut host, 320, 240);
    assert_eq!(host.offset_size(container), Size::new(360, 270));

    let mut prog = GridProgram::with_grid(grid, host);
    let cells: Vec<_> = prog
        .grid()
        .state()
        .cells()
        .iter()
        .map(|cell| cell.element())
        .collect();
    assert_eq!(
        prog.host().document.style(cells[2]).background_image.as_deref(),
        Some("photos/2.png")
    );

    prog.push_event(GridEvent::CellEnter(cells[1]));
    prog.step();
    assert_eq!(prog.grid().state().focused(), None);

    prog.push_event(GridEvent::Click(cells[1]));
    prog.run_until_idle(64);
    assert_eq!(prog.grid().state().focused(), Some(CellId(1)));
    assert_eq!(prog.host().offset_size(cells[1]), Size::new(320, 240));
}

#[test]
fn container_fades_after_inactivity() {
    let (host, container, _) = WebHost::with_grid(4, 200, 200);
    let mut prog = GridProgram::new(host, container, &ZoomGridConfig::default()).unwrap();
    prog.add_extension(Transparency::new()).unwrap();
    prog.add_extension(ContainerFade::new()).unwrap();

    prog.push_event(GridEvent::PointerMove);
    prog.step();
    prog.advance_time(Duration::from_millis(999));
    assert_eq!(prog.step().timers_fired, 0);
    assert_eq!(prog.host().document.style(container).opacity, None);

    prog.advance_time(Duration::from_millis(1));
    prog.step();
    assert_eq!(prog.host().document.style(container).opacity, Some(0.75));

    prog.run_until_idle(16);
    assert_eq!(prog.host().document.style(container).opacity, Some(0.0));
    assert_eq!(prog.now(), Duration::from_millis(1030));

    prog.push_event(GridEvent::PointerMove);
    prog.run_until_idle(16);
    assert_eq!(prog.host().document.style(container).opacity, Some(1.0));
}
