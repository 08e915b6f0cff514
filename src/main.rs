mod demo_scenes;

use demo_scenes::DemoScene;
use log::{error, info};
use scene_sorter::renderer::RenderBatch;
use scene_sorter::scene::extract_batches;
use scene_sorter::{RenderQueue, SortError, SortStats, SorterSettings};

const FRAMES: u32 = 3;

fn run() -> Result<(), SortError> {
    let settings = SorterSettings::load();
    info!("Sorter settings: {:?}", settings);

    let world = DemoScene::default().build();
    let mut queue = RenderQueue::new(settings.build());

    for _ in 0..FRAMES {
        let batches = extract_batches(&world);
        let before = SortStats::measure(&batches);

        queue.begin_frame();
        queue.extend(batches)?;
        let frame = queue.finish()?;

        let mut draws = 0usize;
        frame.submit_to(&mut |batch: &RenderBatch| {
            draws += 1;
            log::trace!("draw {:?} program={:?} mesh={:?}", batch.label, batch.program, batch.mesh);
        });

        info!(
            "Frame {}: {} draws ({} opaque, {} blended)",
            frame.frame_index(),
            draws,
            frame.opaque_count(),
            frame.blended_count()
        );
        if frame.blended().is_none() {
            info!("  blended batches are interleaved with opaque ones");
        }

        let after = frame.stats();
        info!("  unsorted: {}", before);
        info!("  sorted:   {}", after);
        info!(
            "  redundant program switches: {} -> {}",
            before.redundant_program_switches(),
            after.redundant_program_switches()
        );
    }

    Ok(())
}

fn main() {
    scene_sorter::init_logging();

    if let Err(err) = run() {
        error!("Application error: {err}");
        std::process::exit(1);
    }
}
