//! This extension trait simplifies the connection between winit's
//! event loop stages and a game rendering/simulation lifecycle.

/// Phase in the game event loop
pub enum EventPhase {
    /// The game should simulate time forward by the given number of
    /// steps and then render, typically by calling
    /// [`crate::renderer::Renderer::render`].
    Run(usize),
    /// The game should terminate as quickly as possible and close the window.
    Quit,
    /// There's nothing in particular the game should do right now.
    Wait,
}

/// This extension trait is used under the `winit` feature to simplify event-loop handling.
pub trait RendererEvents<T> {
    /// Call `handle_event` on your [`crate::renderer::Renderer`] with
    /// a given [`crate::Clock`] to let spritely figure out "the right
    /// thing to do" for the current `winit` event.  See
    /// [`crate::Clock`] for details on the timestep computation.
    fn handle_event(
        &mut self,
        clock: &mut crate::Clock,
        window: &winit::window::Window,
        evt: &winit::event::Event<T>,
        target: &winit::event_loop::EventLoopWindowTarget<T>,
        input: &mut crate::input::Input,
    ) -> EventPhase;
}
impl<T> RendererEvents<T> for crate::Renderer {
    fn handle_event(
        &mut self,
        clock: &mut crate::Clock,
        window: &winit::window::Window,
        evt: &winit::event::Event<T>,
        _target: &winit::event_loop::EventLoopWindowTarget<T>,
        input: &mut crate::input::Input,
    ) -> EventPhase {
        use winit::event::{Event, WindowEvent};
        match evt {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => EventPhase::Quit,
            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => {
                self.resize_surface(size.width, size.height);
                window.request_redraw();
                EventPhase::Wait
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                let steps = clock.tick();
                window.request_redraw();
                EventPhase::Run(steps)
            }
            Event::AboutToWait => {
                window.request_redraw();
                EventPhase::Wait
            }
            event => {
                input.process_input_event(event);
                EventPhase::Wait
            }
        }
    }
}
