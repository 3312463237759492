fn main() {
    photo_carousel::run();
}
